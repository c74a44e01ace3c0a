//! Common routes: health, version, and the API status probe.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody { status: "ok" })
}

async fn status() -> Json<StatusBody> {
    Json(StatusBody {
        status: "API is running!",
    })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Root-level routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

/// GET /status, mounted under `/api`.
pub fn status_routes() -> Router {
    Router::new().route("/status", get(status))
}
