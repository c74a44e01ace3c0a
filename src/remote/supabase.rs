//! Supabase implementation of [`RemoteStore`]: PostgREST for tables, GoTrue for auth.

use super::{AuthResponse, Credentials, Identity, RemoteStore, Session, TableQuery};
use crate::error::{ConfigError, RemoteError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;

const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";
/// PostgREST answers 406 unless exactly one row matches.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
/// Rate limited; reported as a remote failure, never as refused credentials.
const TOO_MANY_REQUESTS: u16 = 429;

pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
    auth_url: String,
}

impl SupabaseClient {
    /// Build a client for the project at `url`. Every request authenticates with `key`.
    pub fn new(url: &str, key: &str) -> Result<Self, ConfigError> {
        let base = url.trim_end_matches('/');
        let invalid_key = |e: reqwest::header::InvalidHeaderValue| ConfigError::Invalid {
            key: "SUPABASE_KEY",
            reason: e.to_string(),
        };
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key)).map_err(invalid_key)?,
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(SupabaseClient {
            http,
            rest_url: format!("{}/rest/v1", base),
            auth_url: format!("{}/auth/v1", base),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(rejected(response).await)
        }
    }

    /// Auth calls where a 4xx (other than 429) means "no identity" rather than a failure.
    async fn auth_call(&self, request: RequestBuilder) -> Result<AuthResponse, RemoteError> {
        match self.send(request).await {
            Ok(response) => parse_auth_response(response.json().await?),
            Err(RemoteError::Rejected {
                status,
                message,
                body,
            }) if (400..500).contains(&status) && status != TOO_MANY_REQUESTS => {
                tracing::debug!(status, %message, "auth service refused credentials");
                Ok(AuthResponse {
                    user: None,
                    session: None,
                    raw: body,
                })
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl RemoteStore for SupabaseClient {
    async fn select(&self, query: &TableQuery) -> Result<Value, RemoteError> {
        tracing::debug!(table = %query.table, filters = ?query.filters, single = query.single, "select");
        let mut request = self
            .http
            .get(self.table_url(&query.table))
            .query(&query.select_params());
        if query.single {
            request = request.header(ACCEPT, SINGLE_OBJECT);
        }
        Ok(self.send(request).await?.json().await?)
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<Value, RemoteError> {
        tracing::debug!(table = %table, "insert");
        let request = self
            .http
            .post(self.table_url(table))
            .header(PREFER, RETURN_REPRESENTATION)
            .json(record);
        Ok(self.send(request).await?.json().await?)
    }

    async fn update(&self, query: &TableQuery, changes: &Value) -> Result<Value, RemoteError> {
        tracing::debug!(table = %query.table, filters = ?query.filters, "update");
        let request = self
            .http
            .patch(self.table_url(&query.table))
            .query(&query.filter_params())
            .header(PREFER, RETURN_REPRESENTATION)
            .json(changes);
        Ok(self.send(request).await?.json().await?)
    }

    async fn delete(&self, query: &TableQuery) -> Result<(), RemoteError> {
        tracing::debug!(table = %query.table, filters = ?query.filters, "delete");
        let request = self
            .http
            .delete(self.table_url(&query.table))
            .query(&query.filter_params())
            .header(PREFER, RETURN_MINIMAL);
        self.send(request).await?;
        Ok(())
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthResponse, RemoteError> {
        tracing::debug!(email = %credentials.email, "sign up");
        let request = self
            .http
            .post(format!("{}/signup", self.auth_url))
            .json(credentials);
        self.auth_call(request).await
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<AuthResponse, RemoteError> {
        tracing::debug!(email = %credentials.email, "sign in");
        let request = self
            .http
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "password")])
            .json(credentials);
        self.auth_call(request).await
    }

    async fn sign_out(&self, access_token: Option<&str>) -> Result<(), RemoteError> {
        let Some(token) = access_token else {
            tracing::debug!("sign out without session token; nothing to revoke");
            return Ok(());
        };
        let request = self
            .http
            .post(format!("{}/logout", self.auth_url))
            .bearer_auth(token);
        self.send(request).await?;
        Ok(())
    }

    async fn delete_identity(&self, id: &str) -> Result<(), RemoteError> {
        tracing::debug!(id = %id, "delete identity");
        let request = self
            .http
            .delete(format!("{}/admin/users/{}", self.auth_url, id));
        self.send(request).await?;
        Ok(())
    }
}

/// Sign-up answers with either the user itself or a session wrapping it; sign-in always with a session.
fn parse_auth_response(raw: Value) -> Result<AuthResponse, RemoteError> {
    let decode = |e: serde_json::Error| RemoteError::Decode(e.to_string());
    let session = if raw.get("access_token").is_some() {
        Some(serde_json::from_value::<Session>(raw.clone()).map_err(decode)?)
    } else {
        None
    };
    let user = match raw.get("user") {
        Some(user) if user.is_object() => Some(user.clone()),
        _ if raw.get("id").is_some() => Some(raw.clone()),
        _ => None,
    };
    let user = user
        .map(serde_json::from_value::<Identity>)
        .transpose()
        .map_err(decode)?;
    Ok(AuthResponse { user, session, raw })
}

async fn rejected(response: Response) -> RemoteError {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return RemoteError::Transport(e),
    };
    let body: Value = serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()));
    let message = error_message(&body).unwrap_or_else(|| {
        if text.is_empty() {
            status.to_string()
        } else {
            text
        }
    });
    RemoteError::Rejected {
        status: status.as_u16(),
        message,
        body,
    }
}

fn error_message(body: &Value) -> Option<String> {
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}
