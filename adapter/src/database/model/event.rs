use chrono::{DateTime, Utc};
use kernel::model::{
    event::Event,
    id::{EventId, UserId},
};

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub organizer: String,
    pub author_id: UserId,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            title,
            description,
            event_date,
            location,
            organizer,
            author_id,
        } = value;
        Event {
            id: event_id,
            title,
            description,
            event_date,
            location,
            organizer,
            author: author_id,
        }
    }
}
