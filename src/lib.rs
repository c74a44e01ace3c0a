//! S&G sales API: CRUD over users, clients, products and sales plus signup/login/logout,
//! forwarded to a hosted Supabase project.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod remote;
pub mod resource;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use config::Settings;
pub use error::{AppError, ConfigError, RemoteError};
pub use remote::{AuthResponse, Credentials, Identity, RemoteStore, Session, SupabaseClient, TableQuery};
pub use resource::{Operation, Resource};
pub use routes::{api_routes, app, common_routes, HttpOptions};
pub use service::{AuthService, RecordService};
pub use state::AppState;
