use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        event::{CreateEvent, UpdateEvent},
        Event,
    },
    id::{EventId, UserId},
};
use serde::{Deserialize, Serialize};

// 作成と更新（全項目の置き換え）で共通のリクエスト型
#[derive(Debug, Deserialize, Validate)]
pub struct EventRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(length(max = 255))]
    #[serde(default)]
    pub description: Option<String>,
    #[garde(skip)]
    pub event_date: DateTime<Utc>,
    #[garde(length(min = 1, max = 255))]
    pub location: String,
    #[garde(length(min = 1, max = 100))]
    pub organizer: String,
}

#[derive(new)]
pub struct CreateEventRequestWithAuthor(UserId, EventRequest);
impl From<CreateEventRequestWithAuthor> for CreateEvent {
    fn from(value: CreateEventRequestWithAuthor) -> Self {
        let CreateEventRequestWithAuthor(
            author,
            EventRequest {
                title,
                description,
                event_date,
                location,
                organizer,
            },
        ) = value;
        CreateEvent::new(title, description, event_date, location, organizer, author)
    }
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, UserId, EventRequest);
impl From<UpdateEventRequestWithIds> for UpdateEvent {
    fn from(value: UpdateEventRequestWithIds) -> Self {
        let UpdateEventRequestWithIds(
            event_id,
            requested_user,
            EventRequest {
                title,
                description,
                event_date,
                location,
                organizer,
            },
        ) = value;
        UpdateEvent {
            event_id,
            title,
            description,
            event_date,
            location,
            organizer,
            requested_user,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub organizer: String,
    pub author: UserId,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            id,
            title,
            description,
            event_date,
            location,
            organizer,
            author,
        } = value;
        Self {
            id,
            title,
            description,
            event_date,
            location,
            organizer,
            author,
        }
    }
}
