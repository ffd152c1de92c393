use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, DeleteUser, UpdateUser, UpdateUserPassword},
        normalize_email, User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, unique_violation, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT
                    user_id, email, username, phone, role,
                    is_active, created_at, updated_at
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let email = normalize_email(&event.email);
        let password_hash = hash_password(&event.password)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (user_id, email, username, phone, role, password_hash)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING
                    user_id, email, username, phone, role,
                    is_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&email)
        .bind(&event.username)
        .bind(&event.phone)
        .bind(event.role.as_ref())
        .bind(&password_hash)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(map_user_write_error)?;

        tracing::info!(user_id = %user_id, "user signed up");
        User::try_from(row)
    }

    async fn update(&self, event: UpdateUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                UPDATE users
                SET username = $1, phone = $2
                WHERE user_id = $3
                RETURNING
                    user_id, email, username, phone, role,
                    is_active, created_at, updated_at
            "#,
        )
        .bind(&event.username)
        .bind(&event.phone)
        .bind(event.user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(map_user_write_error)?
        .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;

        User::try_from(row)
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let original_password_hash: String = sqlx::query_scalar(
            r#"
                SELECT password_hash FROM users WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;

        // 現在のパスワードが正しいかを検証する
        verify_password(&event.current_password, &original_password_hash)?;

        let new_password_hash = hash_password(&event.new_password)?;
        sqlx::query(
            r#"
                UPDATE users SET password_hash = $1 WHERE user_id = $2
            "#,
        )
        .bind(&new_password_hash)
        .bind(event.user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        // events, registrations は外部キーの ON DELETE CASCADE で削除される
        let res = sqlx::query(
            r#"
                DELETE FROM users WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified user not found".into()));
        }

        tracing::info!(user_id = %event.user_id, "user deleted");
        Ok(())
    }
}

fn map_user_write_error(err: sqlx::Error) -> AppError {
    match unique_violation(&err) {
        Some(constraint) if constraint.contains("phone") => {
            AppError::InvalidInput("user with this phone already exists.".into())
        }
        Some(_) => AppError::InvalidInput("user with this email already exists.".into()),
        None => AppError::SpecificOperationError(err),
    }
}

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AppError::from)
}

pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let valid = bcrypt::verify(password, hash)?;
    if !valid {
        return Err(AppError::UnauthenticatedError);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::role::Role;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AppError::UnauthenticatedError)
        ));
    }

    #[sqlx::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn test_create_and_update_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user = repo
            .create(CreateUser::new(
                "Alice@Example.COM".into(),
                "alice".into(),
                "password".into(),
                None,
                Role::Organizer,
            ))
            .await?;
        assert_eq!(user.email, "Alice@example.com");
        assert_eq!(user.role, Role::Organizer);
        assert!(user.is_active);

        let res = repo
            .create(CreateUser::new(
                "Alice@example.com".into(),
                "alice2".into(),
                "password".into(),
                None,
                Role::User,
            ))
            .await;
        assert!(matches!(res, Err(AppError::InvalidInput(_))));

        let updated = repo
            .update(UpdateUser::new(user.id, "alice-b".into(), Some("0123".into())))
            .await?;
        assert_eq!(updated.username, "alice-b");
        assert_eq!(updated.phone.as_deref(), Some("0123"));

        // 電話番号も一意。登録時と更新時のどちらでも 400 相当のエラーになる
        let res = repo
            .create(CreateUser::new(
                "bob@example.com".into(),
                "bob".into(),
                "password".into(),
                Some("0123".into()),
                Role::User,
            ))
            .await;
        assert!(matches!(res, Err(AppError::InvalidInput(ref m)) if m.contains("phone")));

        let bob = repo
            .create(CreateUser::new(
                "bob@example.com".into(),
                "bob".into(),
                "password".into(),
                Some("0456".into()),
                Role::User,
            ))
            .await?;
        let res = repo
            .update(UpdateUser::new(bob.id, "bob".into(), Some("0123".into())))
            .await;
        assert!(matches!(res, Err(AppError::InvalidInput(ref m)) if m.contains("phone")));

        repo.delete(DeleteUser::new(user.id)).await?;
        assert!(repo.find_current_user(user.id).await?.is_none());
        Ok(())
    }
}
