use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{RegistrationId, UserId},
    registration::{
        event::{CreateRegistration, DeleteRegistration},
        Registration,
    },
};

#[mockall::automock]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    // 同じユーザーとイベントの組み合わせがすでにあれば DuplicateRegistration を返す
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration>;
    async fn find_by_id(&self, registration_id: RegistrationId)
        -> AppResult<Option<Registration>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>>;
    async fn delete(&self, event: DeleteRegistration) -> AppResult<()>;
}
