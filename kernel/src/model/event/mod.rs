use chrono::{DateTime, Utc};

use crate::model::id::{EventId, UserId};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    // 主催者名の表示用ラベル。ユーザーのロールとは無関係
    pub organizer: String,
    pub author: UserId,
}

impl Event {
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author == user_id
    }
}
