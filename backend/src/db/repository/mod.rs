//! Repository trait for the customer store.
//!
//! Handlers and services only see `dyn CustomerRepository`, so a store can be
//! swapped or instantiated per test without touching the HTTP layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::{Customer, CustomerId};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Result of a batch update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdateOutcome {
    /// Full collection after every matching record was applied
    pub customers: Vec<Customer>,
    /// Ids that matched an existing record, in input order
    pub applied: Vec<CustomerId>,
    /// Ids with no matching record, in input order
    pub skipped: Vec<CustomerId>,
}

/// Repository trait for customer operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single instance can be shared
/// by every request through `Arc<dyn CustomerRepository>`.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Check whether the store is usable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Number of customers currently stored.
    async fn count_customers(&self) -> RepositoryResult<usize>;

    /// Snapshot of all customers in display order.
    async fn list_customers(&self) -> RepositoryResult<Vec<Customer>>;

    /// Fetch one customer by id.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if no record has this id.
    async fn get_customer(&self, id: CustomerId) -> RepositoryResult<Customer>;

    /// Append a new customer and assign it the next id.
    ///
    /// Any id carried by `customer` is ignored.
    async fn create_customer(&self, customer: Customer) -> RepositoryResult<Customer>;

    /// Overwrite every field except the id of an existing customer.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if no record has this id; nothing is changed.
    async fn update_customer(&self, id: CustomerId, customer: Customer)
        -> RepositoryResult<Customer>;

    /// Remove a customer and return the remaining collection.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if no record has this id; nothing is changed.
    async fn delete_customer(&self, id: CustomerId) -> RepositoryResult<Vec<Customer>>;

    /// Overwrite each existing record matched by the id of an input record.
    ///
    /// Inputs without a match are reported in `skipped` and otherwise ignored.
    async fn batch_update_customers(
        &self,
        customers: Vec<Customer>,
    ) -> RepositoryResult<BatchUpdateOutcome>;
}
