#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use api::route::v1;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use chrono::Utc;
use kernel::{
    model::{
        auth::{event::CreateToken, AccessToken},
        event::{
            event::{CreateEvent, DeleteEvent, UpdateEvent},
            Event,
        },
        id::{EventId, RegistrationId, UserId},
        registration::{
            event::{CreateRegistration, DeleteRegistration},
            Registration,
        },
        role::Role,
        user::{
            event::{CreateUser, DeleteUser, UpdateUser, UpdateUserPassword},
            normalize_email, User,
        },
    },
    repository::{
        auth::AuthRepository, event::EventRepository, health::HealthCheckRepository,
        registration::RegistrationRepository, user::UserRepository,
    },
};
use registry::AppRegistry;
use serde_json::Value;
use shared::error::{AppError, AppResult};

pub fn user(role: Role) -> User {
    let now = Utc::now();
    let id = UserId::new();
    User {
        id,
        email: format!("{id}@example.com"),
        username: "tester".into(),
        phone: None,
        role,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn event_by(author: UserId, title: &str) -> Event {
    Event {
        id: EventId::new(),
        title: title.into(),
        description: None,
        event_date: Utc::now(),
        location: "Tokyo".into(),
        organizer: "Rust Users".into(),
        author,
    }
}

pub fn token_for(user_id: UserId) -> String {
    format!("token:{user_id}")
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn app_with(registry: AppRegistry) -> Router {
    v1::routes().with_state(registry)
}

#[derive(Default)]
struct StoreState {
    users: Vec<(User, String)>,
    events: Vec<Event>,
    registrations: Vec<Registration>,
}

/// Postgres の代わりに使うメモリ上のストア。外部キーの連鎖削除と一意制約も再現する。
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn registry(self: &Arc<Self>) -> AppRegistry {
        AppRegistry::from_repositories(
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        )
    }

    pub fn registration_count(&self) -> usize {
        self.state.lock().unwrap().registrations.len()
    }

    pub fn event_count(&self) -> usize {
        self.state.lock().unwrap().events.len()
    }
}

#[async_trait]
impl HealthCheckRepository for InMemoryStore {
    async fn check_db(&self) -> bool {
        true
    }
}

#[async_trait]
impl AuthRepository for InMemoryStore {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        Ok(access_token
            .as_str()
            .strip_prefix("token:")
            .and_then(|id| id.parse().ok()))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let email = normalize_email(email);
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|(u, pw)| u.email == email && pw == password && u.is_active)
            .map(|(u, _)| u.id)
            .ok_or(AppError::UnauthenticatedError)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        Ok(AccessToken(token_for(event.user_id)))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.id == current_user_id)
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().unwrap();
        let email = normalize_email(&event.email);
        if state.users.iter().any(|(u, _)| u.email == email) {
            return Err(AppError::InvalidInput(
                "user with this email already exists.".into(),
            ));
        }
        if event.phone.is_some() && state.users.iter().any(|(u, _)| u.phone == event.phone) {
            return Err(AppError::InvalidInput(
                "user with this phone already exists.".into(),
            ));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email,
            username: event.username,
            phone: event.phone,
            role: event.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.users.push((user.clone(), event.password));
        Ok(user)
    }

    async fn update(&self, event: UpdateUser) -> AppResult<User> {
        let mut state = self.state.lock().unwrap();
        if event.phone.is_some()
            && state
                .users
                .iter()
                .any(|(u, _)| u.id != event.user_id && u.phone == event.phone)
        {
            return Err(AppError::InvalidInput(
                "user with this phone already exists.".into(),
            ));
        }
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == event.user_id)
            .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;
        user.username = event.username;
        user.phone = event.phone;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let (_, password) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == event.user_id)
            .ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))?;
        if *password != event.current_password {
            return Err(AppError::UnauthenticatedError);
        }
        *password = event.new_password;
        Ok(())
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.users.len();
        state.users.retain(|(u, _)| u.id != event.user_id);
        if state.users.len() == before {
            return Err(AppError::EntityNotFound("specified user not found".into()));
        }
        let authored: Vec<EventId> = state
            .events
            .iter()
            .filter(|e| e.author == event.user_id)
            .map(|e| e.id)
            .collect();
        state.events.retain(|e| e.author != event.user_id);
        state
            .registrations
            .retain(|r| r.user_id != event.user_id && !authored.contains(&r.event_id));
        Ok(())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        let created = Event {
            id: EventId::new(),
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            location: event.location,
            organizer: event.organizer,
            author: event.author,
        };
        self.state.lock().unwrap().events.push(created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        Ok(self.state.lock().unwrap().events.clone())
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let state = self.state.lock().unwrap();
        Ok(state.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<Event> {
        let mut state = self.state.lock().unwrap();
        let target = state
            .events
            .iter_mut()
            .find(|e| e.id == event.event_id && e.author == event.requested_user)
            .ok_or_else(|| AppError::EntityNotFound("specified event not found".into()))?;
        target.title = event.title;
        target.description = event.description;
        target.event_date = event.event_date;
        target.location = event.location;
        target.organizer = event.organizer;
        let updated = target.clone();
        for r in state.registrations.iter_mut() {
            if r.event_id == updated.id {
                r.event_title = updated.title.clone();
            }
        }
        Ok(updated)
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.events.len();
        state
            .events
            .retain(|e| !(e.id == event.event_id && e.author == event.requested_user));
        if state.events.len() == before {
            return Err(AppError::EntityNotFound("specified event not found".into()));
        }
        state.registrations.retain(|r| r.event_id != event.event_id);
        Ok(())
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration> {
        let mut state = self.state.lock().unwrap();
        let title = state
            .events
            .iter()
            .find(|e| e.id == event.event_id)
            .map(|e| e.title.clone())
            .ok_or_else(|| AppError::EntityNotFound("event not found".into()))?;
        if state
            .registrations
            .iter()
            .any(|r| r.user_id == event.user_id && r.event_id == event.event_id)
        {
            return Err(AppError::DuplicateRegistration(
                "You are already registered for this event.".into(),
            ));
        }
        let registration = Registration {
            id: RegistrationId::new(),
            user_id: event.user_id,
            event_id: event.event_id,
            event_title: title,
            registered_at: Utc::now(),
        };
        state.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn find_by_id(
        &self,
        registration_id: RegistrationId,
    ) -> AppResult<Option<Registration>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .registrations
            .iter()
            .find(|r| r.id == registration_id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .registrations
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, event: DeleteRegistration) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.registrations.len();
        state.registrations.retain(|r| {
            !(r.id == event.registration_id && r.user_id == event.requested_user)
        });
        if state.registrations.len() == before {
            return Err(AppError::EntityNotFound(
                "specified registration not found".into(),
            ));
        }
        Ok(())
    }
}
