//! Shared application state for API handlers.

use std::sync::Arc;

use crate::classify::Classifier;
use crate::storage::PlayStore;

/// Shared state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PlayStore>,
    pub classifier: Arc<Classifier>,
}

impl AppState {
    pub fn new(store: PlayStore, classifier: Classifier) -> Self {
        Self {
            store: Arc::new(store),
            classifier: Arc::new(classifier),
        }
    }
}
