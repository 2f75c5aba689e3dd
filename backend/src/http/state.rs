//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::{CustomerRepository, LocalRepository};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The customer store every request reads and mutates
    pub repository: Arc<dyn CustomerRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// State backed by a fresh in-memory store holding the sample customers.
    pub fn seeded() -> Self {
        Self::new(Arc::new(LocalRepository::seeded()))
    }
}
