use chrono::{DateTime, Utc};

use crate::model::id::{EventId, RegistrationId, UserId};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub event_title: String,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn is_held_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
