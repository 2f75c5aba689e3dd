//! Customer service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers. Each function
//! logs the call and tags failures with the operation name; the storage
//! semantics themselves live in the repository implementation.
//!
//! # Usage
//!
//! ```no_run
//! use crm_backend::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::seeded();
//!     let customers = services::list_customers(&repo).await?;
//!     println!("Found {} customers", customers.len());
//!     Ok(())
//! }
//! ```

use tracing::{debug, info};

use crate::api::{Customer, CustomerId};
use super::repository::{BatchUpdateOutcome, CustomerRepository, RepositoryResult};

// ==================== Health ====================

/// Check if the store is usable.
pub async fn health_check<R: CustomerRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Reads ====================

/// List every customer in display order.
pub async fn list_customers<R: CustomerRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Customer>> {
    let customers = repo
        .list_customers()
        .await
        .map_err(|e| e.with_operation("list_customers"))?;
    debug!(count = customers.len(), "listed customers");
    Ok(customers)
}

/// Count customers without copying the collection.
pub async fn count_customers<R: CustomerRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<usize> {
    repo.count_customers()
        .await
        .map_err(|e| e.with_operation("count_customers"))
}

/// Fetch a single customer.
pub async fn get_customer<R: CustomerRepository + ?Sized>(
    repo: &R,
    id: CustomerId,
) -> RepositoryResult<Customer> {
    debug!(customer_id = %id, "fetching customer");
    repo.get_customer(id)
        .await
        .map_err(|e| e.with_operation("get_customer"))
}

// ==================== Writes ====================

/// Create a customer; the store assigns its id.
pub async fn create_customer<R: CustomerRepository + ?Sized>(
    repo: &R,
    customer: Customer,
) -> RepositoryResult<Customer> {
    let created = repo
        .create_customer(customer)
        .await
        .map_err(|e| e.with_operation("create_customer"))?;
    info!(customer_id = %created.id, name = %created.name, "customer created");
    Ok(created)
}

/// Replace every field but the id of an existing customer.
pub async fn update_customer<R: CustomerRepository + ?Sized>(
    repo: &R,
    id: CustomerId,
    customer: Customer,
) -> RepositoryResult<Customer> {
    let updated = repo
        .update_customer(id, customer)
        .await
        .map_err(|e| e.with_operation("update_customer"))?;
    info!(customer_id = %id, "customer updated");
    Ok(updated)
}

/// Delete a customer and return those remaining.
pub async fn delete_customer<R: CustomerRepository + ?Sized>(
    repo: &R,
    id: CustomerId,
) -> RepositoryResult<Vec<Customer>> {
    let remaining = repo
        .delete_customer(id)
        .await
        .map_err(|e| e.with_operation("delete_customer"))?;
    info!(customer_id = %id, remaining = remaining.len(), "customer deleted");
    Ok(remaining)
}

/// Apply a batch of full-record updates matched by id.
pub async fn batch_update_customers<R: CustomerRepository + ?Sized>(
    repo: &R,
    customers: Vec<Customer>,
) -> RepositoryResult<BatchUpdateOutcome> {
    let requested = customers.len();
    let outcome = repo
        .batch_update_customers(customers)
        .await
        .map_err(|e| e.with_operation("batch_update_customers"))?;
    info!(
        requested,
        applied = outcome.applied.len(),
        skipped = outcome.skipped.len(),
        "batch update applied"
    );
    Ok(outcome)
}
