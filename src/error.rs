//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("remote client: {0}")]
    Client(String),
}

/// Failure reported by the hosted backend or the transport in front of it.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        body: Value,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// True for 4xx answers: the service understood the call and refused it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RemoteError::Rejected { status, .. } if (400..500).contains(status))
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    /// Body could not be read as JSON for a reason other than its content (size, content type).
    #[error("{message}")]
    Payload { status: StatusCode, message: String },
    #[error("{message}")]
    SignUpRejected { message: String, details: Value },
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                AppError::BadRequest(rejection.body_text())
            }
            other => AppError::Payload {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::SignUpRejected { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Payload { status, .. } => *status,
            AppError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Remote(e) = &self {
            tracing::warn!(error = %e, "remote call failed");
        }
        let details = match &self {
            AppError::SignUpRejected { details, .. } => Some(details.clone()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
