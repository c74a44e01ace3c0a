//! Services between handlers and the remote store.

mod auth;
mod records;
pub use auth::{AuthService, LoginOutcome, LoginRequest, ProfileRow, SignupRequest};
pub use records::RecordService;
