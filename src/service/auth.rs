//! Signup, login and logout on top of the remote auth service and the `users` profile table.

use crate::error::AppError;
use crate::remote::{Credentials, Identity, RemoteStore, TableQuery};
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Row written to `users` for every new identity.
#[derive(Clone, Debug, Serialize)]
pub struct ProfileRow {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginOutcome {
    pub user: Identity,
    /// Empty object when the identity has no profile row.
    pub profile: Value,
    pub access_token: String,
}

pub struct AuthService;

impl AuthService {
    /// Create the identity, then its profile row. If the profile insert fails the identity is
    /// deleted again (best effort) and the insert error is returned.
    pub async fn sign_up(store: &dyn RemoteStore, request: SignupRequest) -> Result<Identity, AppError> {
        let credentials = required_credentials(request.email, request.password)?;
        let response = store.sign_up(&credentials).await?;
        let Some(user) = response.user else {
            return Err(AppError::SignUpRejected {
                message: "Failed to create user".into(),
                details: response.raw,
            });
        };

        let profile = ProfileRow {
            id: user.id.clone(),
            email: credentials.email,
            full_name: request.full_name,
            is_admin: false,
        };
        let row = serde_json::to_value(&profile).map_err(|e| AppError::BadRequest(e.to_string()))?;
        if let Err(insert_err) = store.insert(Resource::Users.table(), &row).await {
            match store.delete_identity(&user.id).await {
                Ok(()) => tracing::warn!(id = %user.id, error = %insert_err, "profile insert failed; identity removed"),
                Err(e) => tracing::error!(
                    id = %user.id,
                    error = %insert_err,
                    cleanup_error = %e,
                    "profile insert failed and identity could not be removed"
                ),
            }
            return Err(insert_err.into());
        }
        tracing::info!(id = %user.id, "user signed up");
        Ok(user)
    }

    pub async fn login(store: &dyn RemoteStore, request: LoginRequest) -> Result<LoginOutcome, AppError> {
        let credentials = required_credentials(request.email, request.password)?;
        let response = store.sign_in_with_password(&credentials).await?;
        let (Some(user), Some(session)) = (response.user, response.session) else {
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        };

        let query = TableQuery::from(Resource::Users.table()).eq("id", user.id.as_str()).single();
        let profile = match store.select(&query).await {
            Ok(Value::Null) => Value::Object(Map::new()),
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(id = %user.id, error = %e, "no profile row for identity");
                Value::Object(Map::new())
            }
        };

        Ok(LoginOutcome {
            user,
            profile,
            access_token: session.access_token,
        })
    }

    pub async fn logout(store: &dyn RemoteStore, access_token: Option<&str>) -> Result<(), AppError> {
        store.sign_out(access_token).await?;
        Ok(())
    }
}

fn required_credentials(email: Option<String>, password: Option<String>) -> Result<Credentials, AppError> {
    match (email.filter(|e| !e.is_empty()), password.filter(|p| !p.is_empty())) {
        (Some(email), Some(password)) => Ok(Credentials { email, password }),
        _ => Err(AppError::Validation("Email and password are required".into())),
    }
}
