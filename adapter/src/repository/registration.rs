use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{RegistrationId, UserId},
    registration::{
        event::{CreateRegistration, DeleteRegistration},
        Registration,
    },
};
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::registration::RegistrationRow, unique_violation, ConnectionPool};

const ALREADY_REGISTERED: &str = "You are already registered for this event.";

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration> {
        let mut tx = self.db.begin().await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定のイベント ID をもつイベントが存在するか
        // - 存在した場合、同じユーザーがすでに登録していないか
        //
        // 同時に来た重複リクエストは registrations_user_event_key の一意制約で弾く
        {
            let event_exists: Option<bool> = sqlx::query_scalar(
                r#"
                    SELECT TRUE FROM events WHERE event_id = $1
                "#,
            )
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if event_exists.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "Event ({}) not found.",
                    event.event_id
                )));
            }

            let registered: Option<RegistrationId> = sqlx::query_scalar(
                r#"
                    SELECT registration_id FROM registrations
                    WHERE user_id = $1 AND event_id = $2
                "#,
            )
            .bind(event.user_id)
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if registered.is_some() {
                return Err(AppError::DuplicateRegistration(ALREADY_REGISTERED.into()));
            }
        }

        let registration_id = RegistrationId::new();
        let row = sqlx::query_as::<_, RegistrationRow>(
            r#"
                WITH inserted AS (
                    INSERT INTO registrations (registration_id, user_id, event_id)
                    VALUES ($1, $2, $3)
                    RETURNING registration_id, user_id, event_id, registered_at
                )
                SELECT
                    i.registration_id,
                    i.user_id,
                    i.event_id,
                    e.title AS event_title,
                    i.registered_at
                FROM inserted AS i
                INNER JOIN events AS e ON i.event_id = e.event_id
            "#,
        )
        .bind(registration_id)
        .bind(event.user_id)
        .bind(event.event_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(_) => AppError::DuplicateRegistration(ALREADY_REGISTERED.into()),
            None => AppError::SpecificOperationError(e),
        })?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            registration_id = %registration_id,
            user_id = %event.user_id,
            event_id = %event.event_id,
            "registration created"
        );
        Ok(Registration::from(row))
    }

    async fn find_by_id(
        &self,
        registration_id: RegistrationId,
    ) -> AppResult<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(
            r#"
                SELECT
                    r.registration_id,
                    r.user_id,
                    r.event_id,
                    e.title AS event_title,
                    r.registered_at
                FROM registrations AS r
                INNER JOIN events AS e ON r.event_id = e.event_id
                WHERE r.registration_id = $1
            "#,
        )
        .bind(registration_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Registration::from))
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>> {
        let rows = sqlx::query_as::<_, RegistrationRow>(
            r#"
                SELECT
                    r.registration_id,
                    r.user_id,
                    r.event_id,
                    e.title AS event_title,
                    r.registered_at
                FROM registrations AS r
                INNER JOIN events AS e ON r.event_id = e.event_id
                WHERE r.user_id = $1
                ORDER BY r.registered_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn delete(&self, event: DeleteRegistration) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM registrations
                WHERE registration_id = $1 AND user_id = $2
            "#,
        )
        .bind(event.registration_id)
        .bind(event.requested_user)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified registration not found".into(),
            ));
        }

        tracing::info!(registration_id = %event.registration_id, "registration deleted");
        Ok(())
    }
}
