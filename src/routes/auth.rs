//! Authentication routes.

use crate::handlers::auth::{login, logout, signup};
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .with_state(state)
}
