use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use kernel::{
    model::{
        auth::{event::CreateToken, AccessToken},
        id::UserId,
        user::normalize_email,
    },
    repository::auth::AuthRepository,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

use crate::{
    database::{model::user::UserCredentialRow, ConnectionPool},
    repository::user::verify_password,
};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: UserId,
    iat: i64,
    exp: i64,
}

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    secret: String,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        decode_token(access_token, self.secret.as_bytes())
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let row = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, password_hash, is_active
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row.filter(|r| r.is_active) else {
            return Err(AppError::UnauthenticatedError);
        };
        verify_password(password, &row.password_hash)?;

        Ok(row.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let token = encode_token(event.user_id, self.secret.as_bytes(), self.ttl)?;
        tracing::info!(user_id = %event.user_id, "access token issued");
        Ok(token)
    }
}

fn encode_token(user_id: UserId, secret: &[u8], ttl: u64) -> AppResult<AccessToken> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iat,
        exp: iat + ttl as i64,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )?;
    Ok(AccessToken(token))
}

// 署名不正・期限切れ・形式不正はいずれも「トークンに紐づくユーザーなし」として扱う
fn decode_token(access_token: &AccessToken, secret: &[u8]) -> AppResult<Option<UserId>> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    match jsonwebtoken::decode::<Claims>(
        access_token.as_str(),
        &DecodingKey::from_secret(secret),
        &validation,
    ) {
        Ok(data) => Ok(Some(data.claims.sub)),
        Err(e) => {
            tracing::debug!(error = %e, "rejected access token");
            Ok(None)
        }
    }
}
