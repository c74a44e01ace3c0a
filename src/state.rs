//! Shared application state for all routes. Holds the one remote client created at startup.

use crate::remote::RemoteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RemoteStore>,
}

impl AppState {
    pub fn new(store: impl RemoteStore + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn RemoteStore {
        self.store.as_ref()
    }
}
