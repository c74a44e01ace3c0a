//! Record CRUD routes. The first segment names the resource; handlers resolve it.

use crate::handlers::records::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn record_routes(state: AppState) -> Router {
    Router::new()
        .route("/:path_segment", get(list).post(create))
        .route(
            "/:path_segment/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
