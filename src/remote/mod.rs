//! Remote data client: the hosted table + auth service every handler talks to.

mod query;
mod supabase;

pub use query::{Filter, TableQuery};
pub use supabase::SupabaseClient;

use crate::error::RemoteError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Email/password pair sent to sign-up and sign-in.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Authenticated user as reported by the auth service. Unknown attributes are kept and echoed back.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Outcome of sign-up or sign-in. `user` is absent when the service refused the credentials;
/// `raw` then carries its answer.
#[derive(Clone, Debug, Default)]
pub struct AuthResponse {
    pub user: Option<Identity>,
    pub session: Option<Session>,
    pub raw: Value,
}

/// Table and auth operations against the hosted backend. One instance is shared by all requests.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Select `*`. In single-row mode the result is one object and anything other than
    /// exactly one match is an error; otherwise it is an array.
    async fn select(&self, query: &TableQuery) -> Result<Value, RemoteError>;

    /// Insert a record (or an array of records). Returns the inserted rows.
    async fn insert(&self, table: &str, record: &Value) -> Result<Value, RemoteError>;

    /// Overwrite the supplied fields on every row matching the query filters. Returns the updated rows.
    async fn update(&self, query: &TableQuery, changes: &Value) -> Result<Value, RemoteError>;

    async fn delete(&self, query: &TableQuery) -> Result<(), RemoteError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthResponse, RemoteError>;

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<AuthResponse, RemoteError>;

    /// Revoke the session behind `access_token`. Without a token there is nothing to revoke.
    async fn sign_out(&self, access_token: Option<&str>) -> Result<(), RemoteError>;

    /// Remove an auth identity (admin privilege).
    async fn delete_identity(&self, id: &str) -> Result<(), RemoteError>;
}
