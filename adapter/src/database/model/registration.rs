use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::Registration,
};

// events テーブルと結合し、イベント名も一緒に取り出す
#[derive(sqlx::FromRow)]
pub struct RegistrationRow {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub event_title: String,
    pub registered_at: DateTime<Utc>,
}

impl From<RegistrationRow> for Registration {
    fn from(value: RegistrationRow) -> Self {
        let RegistrationRow {
            registration_id,
            user_id,
            event_id,
            event_title,
            registered_at,
        } = value;
        Registration {
            id: registration_id,
            user_id,
            event_id,
            event_title,
            registered_at,
        }
    }
}
