use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::{id::UserId, user::event::DeleteUser};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AppJson, AppPath, AuthorizedUser},
    model::user::{
        UpdateUserPasswordRequest, UpdateUserPasswordRequestWithUserId, UpdateUserRequest,
        UpdateUserRequestWithUserId, UserResponse,
    },
};

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn update_user(
    user: AuthorizedUser,
    AppPath(raw_user_id): AppPath<String>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user_id = own_user_id(&user, &raw_user_id)?;
    req.validate()?;

    registry
        .user_repository()
        .update(UpdateUserRequestWithUserId::new(user_id, req).into())
        .await
        .map(UserResponse::from)
        .map(Json)
}

pub async fn change_password(
    user: AuthorizedUser,
    AppPath(raw_user_id): AppPath<String>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateUserPasswordRequest>,
) -> AppResult<StatusCode> {
    let user_id = own_user_id(&user, &raw_user_id)?;
    req.validate()?;

    registry
        .user_repository()
        .update_password(UpdateUserPasswordRequestWithUserId::new(user_id, req).into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_user(
    user: AuthorizedUser,
    AppPath(raw_user_id): AppPath<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let user_id = own_user_id(&user, &raw_user_id)?;

    registry
        .user_repository()
        .delete(DeleteUser::new(user_id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

// 他人の ID と UUID として読めない ID は区別せず、どちらも 403 にする
fn own_user_id(user: &AuthorizedUser, raw: &str) -> AppResult<UserId> {
    let user_id = raw
        .parse::<UserId>()
        .map_err(|_| AppError::ForbiddenOperation("Not allowed.".into()))?;
    user.ensure_self(user_id)?;
    Ok(user_id)
}
