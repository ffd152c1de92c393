use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::{event::event::DeleteEvent, event::Event, id::EventId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::{AppJson, AppPath, AuthorizedUser},
    model::event::{
        CreateEventRequestWithAuthor, EventRequest, EventResponse, UpdateEventRequestWithIds,
    },
};

pub async fn show_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<EventResponse>>> {
    registry
        .event_repository()
        .find_all()
        .await
        .map(|events| events.into_iter().map(EventResponse::from).collect())
        .map(Json)
}

pub async fn show_event(
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    find_event(&registry, event_id)
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<EventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    user.ensure_organizer()?;
    req.validate()?;

    registry
        .event_repository()
        .create(CreateEventRequestWithAuthor::new(user.id(), req).into())
        .await
        .map(|event| (StatusCode::CREATED, Json(event.into())))
}

pub async fn update_event(
    user: AuthorizedUser,
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<EventRequest>,
) -> AppResult<Json<EventResponse>> {
    user.ensure_organizer()?;
    let event = find_event(&registry, event_id).await?;
    user.ensure_author_of(&event)?;
    req.validate()?;

    registry
        .event_repository()
        .update(UpdateEventRequestWithIds::new(event_id, user.id(), req).into())
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn delete_event(
    user: AuthorizedUser,
    AppPath(event_id): AppPath<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.ensure_organizer()?;
    let event = find_event(&registry, event_id).await?;
    user.ensure_author_of(&event)?;

    registry
        .event_repository()
        .delete(DeleteEvent::new(event_id, user.id()))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

async fn find_event(registry: &AppRegistry, event_id: EventId) -> AppResult<Event> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Not found.".into()))
}
