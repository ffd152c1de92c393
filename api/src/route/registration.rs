use axum::{
    routing::{delete, get},
    Router,
};
use registry::AppRegistry;

use crate::handler::registration::{register, show_my_registrations, unregister};

pub fn build_registration_routers() -> Router<AppRegistry> {
    let registration_routers = Router::new()
        .route("/", get(show_my_registrations).post(register))
        .route("/:registration_id", delete(unregister));

    Router::new().nest("/registrations", registration_routers)
}
