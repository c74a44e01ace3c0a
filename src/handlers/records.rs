//! Record CRUD handlers shared by every resource: list, read, create, update, delete.

use crate::error::AppError;
use crate::resource::{Operation, Resource};
use crate::response::{created, message, ok};
use crate::service::RecordService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resource = Resource::resolve(&path_segment, Operation::List)?;
    let rows = RecordService::list(state.store(), resource).await?;
    Ok(ok(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = Resource::resolve(&path_segment, Operation::Read)?;
    let row = RecordService::read(state.store(), resource, &id).await?;
    Ok(ok(row))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let resource = Resource::resolve(&path_segment, Operation::Create)?;
    let Json(body) = body?;
    let rows = RecordService::create(state.store(), resource, &body).await?;
    Ok(created(rows))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let resource = Resource::resolve(&path_segment, Operation::Update)?;
    let Json(body) = body?;
    let rows = RecordService::update(state.store(), resource, &id, &body).await?;
    Ok(ok(rows))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = Resource::resolve(&path_segment, Operation::Delete)?;
    RecordService::delete(state.store(), resource, &id).await?;
    Ok(message(resource.deleted_message()))
}
