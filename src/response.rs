//! Response helpers. Store payloads are returned as-is, without an envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub fn ok(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(data))
}

pub fn created(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(data))
}

pub fn message(text: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: text.into(),
        }),
    )
}
