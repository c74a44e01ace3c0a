//! HTTP handlers for record CRUD and authentication.

pub mod auth;
pub mod records;
