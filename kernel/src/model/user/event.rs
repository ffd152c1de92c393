use crate::model::{id::UserId, role::Role};
use derive_new::new;

#[derive(new)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
}

#[derive(Debug, new)]
pub struct UpdateUser {
    pub user_id: UserId,
    pub username: String,
    pub phone: Option<String>,
}

#[derive(new)]
pub struct UpdateUserPassword {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, new)]
pub struct DeleteUser {
    pub user_id: UserId,
}
