//! Customer store.
//!
//! Storage is reached through the `CustomerRepository` trait so handlers never
//! depend on a concrete backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers (http/)                                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - logging, error tagging   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │     (in-memory, single RwLock over all)       │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! There is no process-wide store: the server binary builds one repository at
//! startup and hands it to the router, and every test builds its own.

pub mod repositories;
pub mod repository;
pub mod services;

use std::sync::Arc;

pub use repositories::LocalRepository;
pub use repository::{
    BatchUpdateOutcome, CustomerRepository, ErrorContext, RepositoryError, RepositoryResult,
};
pub use services::{
    batch_update_customers, create_customer, delete_customer, get_customer, health_check,
    list_customers, update_customer,
};

use crate::config::StoreSettings;

/// Build the store described by `settings`.
pub fn create_repository(settings: &StoreSettings) -> Arc<dyn CustomerRepository> {
    let repo = if settings.seed {
        LocalRepository::seeded()
    } else {
        LocalRepository::new()
    };
    Arc::new(repo)
}
