use axum::{extract::State, http::StatusCode, Json};
use kernel::model::{
    id::RegistrationId,
    registration::event::{CreateRegistration, DeleteRegistration},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AppJson, AppPath, AuthorizedUser},
    model::registration::{CreateRegistrationRequest, RegistrationResponse},
};

pub async fn show_my_registrations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<RegistrationResponse>>> {
    registry
        .registration_repository()
        .find_by_user_id(user.id())
        .await
        .map(|items| {
            items
                .into_iter()
                .filter(|r| r.is_held_by(user.id()))
                .map(RegistrationResponse::from)
                .collect()
        })
        .map(Json)
}

pub async fn register(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateRegistrationRequest>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    registry
        .registration_repository()
        .create(CreateRegistration::new(user.id(), req.event))
        .await
        .map(|registration| (StatusCode::CREATED, Json(registration.into())))
}

pub async fn unregister(
    user: AuthorizedUser,
    AppPath(registration_id): AppPath<RegistrationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let registration = registry
        .registration_repository()
        .find_by_id(registration_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Not found.".into()))?;
    user.ensure_registrant_of(&registration)?;

    registry
        .registration_repository()
        .delete(DeleteRegistration::new(registration_id, user.id()))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
