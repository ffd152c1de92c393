use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event,
    },
    id::EventId,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::event::EventRow, ConnectionPool};

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
                INSERT INTO events
                (event_id, title, description, event_date, location, organizer, author_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING
                    event_id, title, description, event_date,
                    location, organizer, author_id
            "#,
        )
        .bind(EventId::new())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.location)
        .bind(&event.organizer)
        .bind(event.author)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        tracing::info!(event_id = %row.event_id, author = %row.author_id, "event created");
        Ok(Event::from(row))
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                    event_id, title, description, event_date,
                    location, organizer, author_id
                FROM events
                ORDER BY event_date ASC, created_at ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                    event_id, title, description, event_date,
                    location, organizer, author_id
                FROM events
                WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Event::from))
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<Event> {
        // 作成者以外が指定された場合は 1 行も更新されない
        let row = sqlx::query_as::<_, EventRow>(
            r#"
                UPDATE events
                SET
                    title = $1,
                    description = $2,
                    event_date = $3,
                    location = $4,
                    organizer = $5
                WHERE event_id = $6 AND author_id = $7
                RETURNING
                    event_id, title, description, event_date,
                    location, organizer, author_id
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.location)
        .bind(&event.organizer)
        .bind(event.event_id)
        .bind(event.requested_user)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("specified event not found".into()))?;

        tracing::info!(event_id = %row.event_id, "event updated");
        Ok(Event::from(row))
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM events
                WHERE event_id = $1 AND author_id = $2
            "#,
        )
        .bind(event.event_id)
        .bind(event.requested_user)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified event not found".into()));
        }

        tracing::info!(event_id = %event.event_id, "event deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use chrono::{TimeZone, Utc};
    use kernel::{
        model::{
            role::Role,
            user::event::{CreateUser, DeleteUser},
        },
        repository::user::UserRepository,
    };

    #[sqlx::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn test_event_lifecycle(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let users = UserRepositoryImpl::new(db.clone());
        let repo = EventRepositoryImpl::new(db);

        let author = users
            .create(CreateUser::new(
                "org@example.com".into(),
                "org".into(),
                "password".into(),
                None,
                Role::Organizer,
            ))
            .await?;
        let stranger = users
            .create(CreateUser::new(
                "other@example.com".into(),
                "other".into(),
                "password".into(),
                None,
                Role::Organizer,
            ))
            .await?;

        let event_date = Utc.with_ymd_and_hms(2026, 11, 1, 18, 0, 0).unwrap();
        let created = repo
            .create(CreateEvent::new(
                "RustConf".into(),
                None,
                event_date,
                "Tokyo".into(),
                "Rust Users".into(),
                author.id,
            ))
            .await?;
        assert_eq!(created.author, author.id);
        assert_eq!(repo.find_all().await?.len(), 1);

        let res = repo
            .update(UpdateEvent::new(
                created.id,
                "Hijacked".into(),
                None,
                event_date,
                "Osaka".into(),
                "Nobody".into(),
                stranger.id,
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let updated = repo
            .update(UpdateEvent::new(
                created.id,
                "RustConf 2026".into(),
                Some("annual".into()),
                event_date,
                "Tokyo".into(),
                "Rust Users".into(),
                author.id,
            ))
            .await?;
        assert_eq!(updated.title, "RustConf 2026");

        // 作成者の削除でイベントも消える
        users.delete(DeleteUser::new(author.id)).await?;
        assert!(repo.find_by_id(created.id).await?.is_none());
        Ok(())
    }
}
