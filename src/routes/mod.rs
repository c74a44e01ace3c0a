//! Router assembly: `/api` routes, root probes, and the HTTP layers around them.

mod auth;
mod common;
mod records;

pub use auth::auth_routes;
pub use common::{common_routes, status_routes};
pub use records::record_routes;

use crate::config::{Settings, DEFAULT_BODY_LIMIT_BYTES};
use crate::state::AppState;
use axum::Router;
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// HTTP-facing options taken from [`Settings`].
#[derive(Clone, Debug)]
pub struct HttpOptions {
    pub body_limit_bytes: usize,
    pub static_dir: Option<PathBuf>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        HttpOptions {
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            static_dir: None,
        }
    }
}

impl From<&Settings> for HttpOptions {
    fn from(settings: &Settings) -> Self {
        HttpOptions {
            body_limit_bytes: settings.body_limit_bytes,
            static_dir: settings.static_dir.clone(),
        }
    }
}

/// All API routes, unprefixed. Mounted under `/api` by [`app`].
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(status_routes())
        .merge(auth_routes(state.clone()))
        .merge(record_routes(state))
}

/// Full application: `/api/...`, `/health`, `/version`, optional front-end fallback, CORS,
/// body limit and request tracing.
pub fn app(state: AppState, options: HttpOptions) -> Router {
    let mut router = Router::new()
        .merge(common_routes())
        .nest("/api", api_routes(state));

    if let Some(dir) = options.static_dir {
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(options.body_limit_bytes))
            // Cors needs a `Default` inner body, which the limit's response body is not.
            .layer(CorsLayer::permissive()),
    )
}
