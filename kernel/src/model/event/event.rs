use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::id::{EventId, UserId};

#[derive(Debug, new)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub organizer: String,
    pub author: UserId,
}

#[derive(Debug, new)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub organizer: String,
    pub requested_user: UserId,
}

#[derive(Debug, new)]
pub struct DeleteEvent {
    pub event_id: EventId,
    pub requested_user: UserId,
}
