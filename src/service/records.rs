//! Generic record operations: one remote call per operation, results passed through untouched.

use crate::error::AppError;
use crate::remote::{RemoteStore, TableQuery};
use crate::resource::Resource;
use serde_json::Value;

pub struct RecordService;

impl RecordService {
    /// All rows, in whatever order the store returns them.
    pub async fn list(store: &dyn RemoteStore, resource: Resource) -> Result<Value, AppError> {
        let query = TableQuery::from(resource.table());
        Ok(store.select(&query).await?)
    }

    /// Exactly one row by id; zero or several matches surface as a remote error.
    pub async fn read(store: &dyn RemoteStore, resource: Resource, id: &str) -> Result<Value, AppError> {
        let query = TableQuery::from(resource.table()).eq("id", id).single();
        Ok(store.select(&query).await?)
    }

    pub async fn create(store: &dyn RemoteStore, resource: Resource, body: &Value) -> Result<Value, AppError> {
        Ok(store.insert(resource.table(), body).await?)
    }

    /// Overwrites only the fields present in `body`.
    pub async fn update(
        store: &dyn RemoteStore,
        resource: Resource,
        id: &str,
        body: &Value,
    ) -> Result<Value, AppError> {
        let query = TableQuery::from(resource.table()).eq("id", id);
        Ok(store.update(&query, body).await?)
    }

    pub async fn delete(store: &dyn RemoteStore, resource: Resource, id: &str) -> Result<(), AppError> {
        let query = TableQuery::from(resource.table()).eq("id", id);
        store.delete(&query).await?;
        Ok(())
    }
}
