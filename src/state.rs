//! Shared application state for all routes.

use crate::store::BakeryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BakeryStore>,
}

impl AppState {
    pub fn new<S: BakeryStore + 'static>(store: S) -> Self {
        Self { store: Arc::new(store) }
    }
}
