use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{change_password, delete_user, get_current_user, update_user};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/me", get(get_current_user))
        .route("/:user_id", put(update_user).delete(delete_user))
        .route("/:user_id/password", put(change_password));

    Router::new().nest("/users", user_routers)
}
