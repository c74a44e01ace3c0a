//! In-memory `RemoteStore` used to drive the router without a hosted backend.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use serde_json::{json, Map, Value};
use sg_api::{
    app, AppState, AuthResponse, Credentials, HttpOptions, Identity, RemoteError, RemoteStore, Session,
    TableQuery,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Vec<Map<String, Value>>>,
    /// email -> (password, identity)
    accounts: HashMap<String, (String, Identity)>,
    failing_tables: Vec<String>,
    refuse_signups: bool,
    auth_calls: usize,
    signed_out: Vec<Option<String>>,
    deleted_identities: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<Inner>>,
}

fn rejected(status: u16, message: &str) -> RemoteError {
    RemoteError::Rejected {
        status,
        message: message.to_string(),
        body: json!({ "message": message }),
    }
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every table operation on `table` fails with a 500 from now on.
    pub fn fail_table(&self, table: &str) {
        self.inner.lock().unwrap().failing_tables.push(table.to_string());
    }

    pub fn refuse_signups(&self) {
        self.inner.lock().unwrap().refuse_signups = true;
    }

    /// Register an identity without a profile row.
    pub fn add_account(&self, email: &str, password: &str) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let identity = Identity {
            id: id.clone(),
            email: Some(email.to_string()),
            attributes: Map::new(),
        };
        self.inner
            .lock()
            .unwrap()
            .accounts
            .insert(email.to_string(), (password.to_string(), identity));
        id
    }

    pub fn rows(&self, table: &str) -> Vec<Map<String, Value>> {
        self.inner.lock().unwrap().tables.get(table).cloned().unwrap_or_default()
    }

    pub fn account_count(&self) -> usize {
        self.inner.lock().unwrap().accounts.len()
    }

    pub fn auth_calls(&self) -> usize {
        self.inner.lock().unwrap().auth_calls
    }

    pub fn signed_out(&self) -> Vec<Option<String>> {
        self.inner.lock().unwrap().signed_out.clone()
    }

    pub fn deleted_identities(&self) -> Vec<String> {
        self.inner.lock().unwrap().deleted_identities.clone()
    }

    fn check_table(inner: &Inner, table: &str) -> Result<(), RemoteError> {
        if inner.failing_tables.iter().any(|t| t == table) {
            return Err(rejected(500, &format!("table {} unavailable", table)));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn select(&self, query: &TableQuery) -> Result<Value, RemoteError> {
        let inner = self.inner.lock().unwrap();
        Self::check_table(&inner, &query.table)?;
        let rows: Vec<Value> = inner
            .tables
            .get(&query.table)
            .into_iter()
            .flatten()
            .map(|r| Value::Object(r.clone()))
            .filter(|r| query.matches(r))
            .collect();
        if query.single {
            if rows.len() != 1 {
                return Err(rejected(406, "JSON object requested, multiple (or no) rows returned"));
            }
            return Ok(rows.into_iter().next().unwrap_or(Value::Null));
        }
        Ok(Value::Array(rows))
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<Value, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_table(&inner, table)?;
        let Value::Object(fields) = record else {
            return Err(rejected(400, "record must be an object"));
        };
        let mut row = fields.clone();
        row.entry("id")
            .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
        inner.tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(Value::Array(vec![Value::Object(row)]))
    }

    async fn update(&self, query: &TableQuery, changes: &Value) -> Result<Value, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_table(&inner, &query.table)?;
        let Value::Object(changes) = changes else {
            return Err(rejected(400, "changes must be an object"));
        };
        let mut updated = Vec::new();
        for row in inner.tables.entry(query.table.clone()).or_default().iter_mut() {
            if query.matches(&Value::Object(row.clone())) {
                for (k, v) in changes {
                    row.insert(k.clone(), v.clone());
                }
                updated.push(Value::Object(row.clone()));
            }
        }
        Ok(Value::Array(updated))
    }

    async fn delete(&self, query: &TableQuery) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_table(&inner, &query.table)?;
        if let Some(rows) = inner.tables.get_mut(&query.table) {
            rows.retain(|r| !query.matches(&Value::Object(r.clone())));
        }
        Ok(())
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthResponse, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.auth_calls += 1;
        if inner.refuse_signups || inner.accounts.contains_key(&credentials.email) {
            return Ok(AuthResponse {
                user: None,
                session: None,
                raw: json!({ "msg": "User already registered" }),
            });
        }
        let identity = Identity {
            id: uuid::Uuid::new_v4().to_string(),
            email: Some(credentials.email.clone()),
            attributes: Map::from_iter([("role".to_string(), json!("authenticated"))]),
        };
        inner.accounts.insert(
            credentials.email.clone(),
            (credentials.password.clone(), identity.clone()),
        );
        Ok(AuthResponse {
            user: Some(identity),
            session: None,
            raw: Value::Null,
        })
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<AuthResponse, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.auth_calls += 1;
        match inner.accounts.get(&credentials.email) {
            Some((password, identity)) if *password == credentials.password => Ok(AuthResponse {
                user: Some(identity.clone()),
                session: Some(Session {
                    access_token: format!("token-{}", identity.id),
                    refresh_token: None,
                    token_type: Some("bearer".into()),
                    expires_in: Some(3600),
                }),
                raw: Value::Null,
            }),
            _ => Ok(AuthResponse {
                user: None,
                session: None,
                raw: json!({ "error": "invalid_grant" }),
            }),
        }
    }

    async fn sign_out(&self, access_token: Option<&str>) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        if access_token == Some("expired") {
            return Err(rejected(500, "session store unavailable"));
        }
        inner.signed_out.push(access_token.map(str::to_string));
        Ok(())
    }

    async fn delete_identity(&self, id: &str) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.accounts.retain(|_, (_, identity)| identity.id != id);
        inner.deleted_identities.push(id.to_string());
        Ok(())
    }
}

pub fn router(store: &FakeStore) -> Router {
    app(AppState::new(store.clone()), HttpOptions::default())
}

/// Send one request through the router; returns status and JSON body (Null when empty).
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (u16, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
