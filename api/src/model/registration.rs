use kernel::model::{
    id::{EventId, RegistrationId},
    registration::Registration,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateRegistrationRequest {
    pub event: EventId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub id: RegistrationId,
    pub event: EventId,
    pub event_title: String,
}

impl From<Registration> for RegistrationResponse {
    fn from(value: Registration) -> Self {
        let Registration {
            id,
            event_id,
            event_title,
            ..
        } = value;
        Self {
            id,
            event: event_id,
            event_title,
        }
    }
}
