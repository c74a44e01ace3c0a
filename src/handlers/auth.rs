//! Auth handlers: signup, login, logout.

use crate::error::AppError;
use crate::extractors::BearerToken;
use crate::response::message;
use crate::service::{AuthService, LoginRequest, SignupRequest};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = body?;
    let user = AuthService::sign_up(state.store(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully!",
            "user": user,
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = body?;
    let outcome = AuthService::login(state.store(), request).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Login successful!",
            "user": outcome.user,
            "profile": outcome.profile,
            "access_token": outcome.access_token,
        })),
    ))
}

/// POST /api/auth/logout. Revokes the session named by the bearer token, if any.
pub async fn logout(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::logout(state.store(), token.as_deref()).await?;
    Ok(message("Logout successful!"))
}
