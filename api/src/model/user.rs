use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{CreateUser, UpdateUser, UpdateUserPassword},
        User,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Organizer,
    #[default]
    User,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Organizer => Self::Organizer,
            Role::User => Self::User,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Organizer => Self::Organizer,
            RoleName::User => Self::User,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: RoleName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            username,
            phone,
            role,
            is_active: _,
            created_at,
            updated_at,
        } = value;
        Self {
            id,
            username,
            email,
            phone,
            role: RoleName::from(role),
            created_at,
            updated_at,
        }
    }
}

// 空文字の電話番号は未登録として扱う
fn non_empty(phone: Option<String>) -> Option<String> {
    phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[garde(email, length(max = 254))]
    email: String,
    #[garde(length(min = 1, max = 50))]
    username: String,
    #[garde(length(min = 1))]
    password: String,
    #[garde(length(max = 50))]
    #[serde(default)]
    phone: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    role: RoleName,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            email,
            username,
            password,
            phone,
            role,
        } = value;
        CreateUser::new(email, username, password, non_empty(phone), role.into())
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[garde(length(min = 1, max = 50))]
    username: String,
    #[garde(length(max = 50))]
    #[serde(default)]
    phone: Option<String>,
}

#[derive(new)]
pub struct UpdateUserRequestWithUserId(UserId, UpdateUserRequest);
impl From<UpdateUserRequestWithUserId> for UpdateUser {
    fn from(value: UpdateUserRequestWithUserId) -> Self {
        let UpdateUserRequestWithUserId(user_id, UpdateUserRequest { username, phone }) = value;
        UpdateUser::new(user_id, username, non_empty(phone))
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateUserPasswordRequest {
    #[garde(length(min = 1))]
    current_password: String,
    #[garde(length(min = 1))]
    new_password: String,
}

#[derive(new)]
pub struct UpdateUserPasswordRequestWithUserId(UserId, UpdateUserPasswordRequest);
impl From<UpdateUserPasswordRequestWithUserId> for UpdateUserPassword {
    fn from(value: UpdateUserPasswordRequestWithUserId) -> Self {
        let UpdateUserPasswordRequestWithUserId(
            user_id,
            UpdateUserPasswordRequest {
                current_password,
                new_password,
            },
        ) = value;
        UpdateUserPassword {
            user_id,
            current_password,
            new_password,
        }
    }
}
