//! In-memory local repository implementation.
//!
//! The whole customer collection and the id counter live behind one
//! `parking_lot::RwLock`. Reads take the shared side, every mutation takes
//! the exclusive side, so a create can never interleave with a list, update
//! or delete.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{sample_customers, Customer, CustomerId, SEED_NEXT_ID};
use crate::db::repository::{
    BatchUpdateOutcome, CustomerRepository, ErrorContext, RepositoryError, RepositoryResult,
};

const NOT_FOUND_MESSAGE: &str = "Customer not found";

/// In-memory customer store.
///
/// Cloning is cheap and yields a handle to the same data.
///
/// # Example
/// ```
/// use crm_backend::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::seeded();
/// assert_eq!(repo.customer_count(), 3);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    // Insertion order is the display order, so a Vec rather than a map.
    customers: Vec<Customer>,
    next_id: CustomerId,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            customers: Vec::new(),
            next_id: CustomerId(1),
        }
    }
}

impl LocalData {
    fn position(&self, id: CustomerId) -> Option<usize> {
        self.customers.iter().position(|c| c.id == id)
    }

    fn allocate_id(&mut self) -> RepositoryResult<CustomerId> {
        let id = self.next_id;
        let next = id.value().checked_add(1).ok_or_else(|| {
            RepositoryError::internal_with_context(
                "customer id space exhausted",
                ErrorContext::new("create_customer").with_entity("customer"),
            )
        })?;
        self.next_id = CustomerId(next);
        Ok(id)
    }
}

fn not_found(operation: &str, id: CustomerId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        NOT_FOUND_MESSAGE,
        ErrorContext::new(operation)
            .with_entity("customer")
            .with_entity_id(id),
    )
}

impl LocalRepository {
    /// Create a new empty repository; the first customer gets id 1.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository holding the three sample customers, next id 4.
    pub fn seeded() -> Self {
        Self::with_customers(sample_customers(), SEED_NEXT_ID)
    }

    /// Create a repository from existing records.
    ///
    /// `next_id` is raised above the largest existing id if needed, so ids
    /// handed out later can never collide with `customers`.
    pub fn with_customers(customers: Vec<Customer>, next_id: CustomerId) -> Self {
        let max_existing = customers.iter().map(|c| c.id).max();
        let next_id = match max_existing {
            Some(max) if max >= next_id => CustomerId(max.value().saturating_add(1)),
            _ => next_id,
        };
        Self {
            data: Arc::new(RwLock::new(LocalData { customers, next_id })),
        }
    }

    /// Get the number of customers stored.
    pub fn customer_count(&self) -> usize {
        self.data.read().customers.len()
    }

    /// Id the next create will assign.
    pub fn next_id(&self) -> CustomerId {
        self.data.read().next_id
    }

    /// Clear all data and reset the id counter to 1.
    pub fn clear(&self) {
        *self.data.write() = LocalData::default();
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn count_customers(&self) -> RepositoryResult<usize> {
        Ok(self.customer_count())
    }

    async fn list_customers(&self) -> RepositoryResult<Vec<Customer>> {
        Ok(self.data.read().customers.clone())
    }

    async fn get_customer(&self, id: CustomerId) -> RepositoryResult<Customer> {
        let data = self.data.read();
        data.customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("get_customer", id))
    }

    async fn create_customer(&self, customer: Customer) -> RepositoryResult<Customer> {
        let mut data = self.data.write();
        let id = data.allocate_id()?;
        let created = customer.with_id(id);
        data.customers.push(created.clone());
        debug!(customer_id = %id, "customer appended");
        Ok(created)
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        customer: Customer,
    ) -> RepositoryResult<Customer> {
        let mut data = self.data.write();
        let index = data
            .position(id)
            .ok_or_else(|| not_found("update_customer", id))?;
        let updated = customer.with_id(id);
        data.customers[index] = updated.clone();
        Ok(updated)
    }

    async fn delete_customer(&self, id: CustomerId) -> RepositoryResult<Vec<Customer>> {
        let mut data = self.data.write();
        let index = data
            .position(id)
            .ok_or_else(|| not_found("delete_customer", id))?;
        data.customers.remove(index);
        Ok(data.customers.clone())
    }

    async fn batch_update_customers(
        &self,
        customers: Vec<Customer>,
    ) -> RepositoryResult<BatchUpdateOutcome> {
        let mut data = self.data.write();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        for customer in customers {
            match data.position(customer.id) {
                Some(index) => {
                    applied.push(customer.id);
                    data.customers[index] = customer;
                }
                None => skipped.push(customer.id),
            }
        }

        if !skipped.is_empty() {
            warn!(?skipped, "batch update ignored unknown customer ids");
        }

        Ok(BatchUpdateOutcome {
            customers: data.customers.clone(),
            applied,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Customer {
        Customer::new("Alice", "Tester", "alice@example.com", "111-222-3333", false)
    }

    #[tokio::test]
    async fn test_new_repository_is_empty() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());
        assert!(repo.list_customers().await.unwrap().is_empty());
        assert_eq!(repo.count_customers().await.unwrap(), 0);
        assert_eq!(repo.next_id(), CustomerId(1));
    }

    #[tokio::test]
    async fn test_seeded_repository() {
        let repo = LocalRepository::seeded();
        let customers = repo.list_customers().await.unwrap();
        assert_eq!(customers.len(), 3);
        assert_eq!(customers[0].name, "John Doe");
        assert_eq!(repo.count_customers().await.unwrap(), 3);
        assert_eq!(repo.next_id(), CustomerId(4));
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids_and_ignores_input_id() {
        let repo = LocalRepository::seeded();
        let first = repo
            .create_customer(alice().with_id(CustomerId(1)))
            .await
            .unwrap();
        let second = repo.create_customer(alice()).await.unwrap();

        assert_eq!(first.id, CustomerId(4));
        assert_eq!(second.id, CustomerId(5));
        assert_eq!(repo.customer_count(), 5);

        let listed = repo.list_customers().await.unwrap();
        assert_eq!(listed.last().unwrap().id, CustomerId(5));
    }

    #[tokio::test]
    async fn test_get_missing_customer_is_not_found() {
        let repo = LocalRepository::seeded();
        let err = repo.get_customer(CustomerId(99)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.context().entity_id.as_deref(), Some("99"));
        assert_eq!(err.context().operation.as_deref(), Some("get_customer"));
    }

    #[tokio::test]
    async fn test_update_keeps_path_id() {
        let repo = LocalRepository::seeded();
        let input = Customer {
            name: "John Updated".to_string(),
            ..Customer::default()
        }
        .with_id(CustomerId(42));

        let updated = repo.update_customer(CustomerId(1), input).await.unwrap();
        assert_eq!(updated.id, CustomerId(1));
        assert_eq!(updated.name, "John Updated");
        assert!(updated.email.is_empty());

        let stored = repo.get_customer(CustomerId(1)).await.unwrap();
        assert_eq!(stored, updated);
        assert!(repo.get_customer(CustomerId(42)).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_customer_changes_nothing() {
        let repo = LocalRepository::seeded();
        let before = repo.list_customers().await.unwrap();
        let err = repo
            .update_customer(CustomerId(99), alice())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.list_customers().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_preserves_order_of_remaining() {
        let repo = LocalRepository::seeded();
        repo.create_customer(alice()).await.unwrap();

        let remaining = repo.delete_customer(CustomerId(2)).await.unwrap();
        let ids: Vec<i64> = remaining.iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, vec![1, 3, 4]);

        let err = repo.get_customer(CustomerId(2)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_customer_is_not_found() {
        let repo = LocalRepository::seeded();
        let err = repo.delete_customer(CustomerId(7)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.customer_count(), 3);
    }

    #[tokio::test]
    async fn test_deleted_id_is_never_reissued() {
        let repo = LocalRepository::seeded();
        let created = repo.create_customer(alice()).await.unwrap();
        repo.delete_customer(created.id).await.unwrap();
        let next = repo.create_customer(alice()).await.unwrap();
        assert!(next.id > created.id);
    }

    #[tokio::test]
    async fn test_batch_update_reports_skipped_ids() {
        let repo = LocalRepository::seeded();
        let batch = vec![
            Customer::new("Jane Updated", "Lead", "jane@corp.com", "000", true)
                .with_id(CustomerId(2)),
            alice().with_id(CustomerId(99)),
        ];

        let outcome = repo.batch_update_customers(batch).await.unwrap();
        assert_eq!(outcome.applied, vec![CustomerId(2)]);
        assert_eq!(outcome.skipped, vec![CustomerId(99)]);
        assert_eq!(outcome.customers.len(), 3);
        assert_eq!(outcome.customers[1].name, "Jane Updated");
        assert!(outcome.customers[1].contacted);
    }

    #[tokio::test]
    async fn test_batch_update_duplicate_ids_last_wins() {
        let repo = LocalRepository::seeded();
        let batch = vec![
            Customer::new("First", "", "", "", false).with_id(CustomerId(3)),
            Customer::new("Second", "", "", "", false).with_id(CustomerId(3)),
        ];

        let outcome = repo.batch_update_customers(batch).await.unwrap();
        assert_eq!(outcome.applied, vec![CustomerId(3), CustomerId(3)]);
        assert_eq!(repo.get_customer(CustomerId(3)).await.unwrap().name, "Second");
    }

    #[tokio::test]
    async fn test_empty_batch_returns_collection() {
        let repo = LocalRepository::seeded();
        let outcome = repo.batch_update_customers(Vec::new()).await.unwrap();
        assert_eq!(outcome.customers.len(), 3);
        assert!(outcome.applied.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_with_customers_raises_next_id_above_existing() {
        let repo = LocalRepository::with_customers(sample_customers(), CustomerId(2));
        assert_eq!(repo.next_id(), CustomerId(4));

        let repo = LocalRepository::with_customers(sample_customers(), CustomerId(10));
        assert_eq!(repo.next_id(), CustomerId(10));
    }

    #[tokio::test]
    async fn test_exhausted_id_space_is_internal_error() {
        let repo = LocalRepository::with_customers(Vec::new(), CustomerId(i64::MAX));
        let err = repo.create_customer(alice()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InternalError { .. }));
        assert_eq!(repo.customer_count(), 0);
    }

    #[tokio::test]
    async fn test_clear_resets_counter() {
        let repo = LocalRepository::seeded();
        repo.clear();
        assert_eq!(repo.customer_count(), 0);
        let created = repo.create_customer(alice()).await.unwrap();
        assert_eq!(created.id, CustomerId(1));
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let repo = LocalRepository::new();
        let handle = repo.clone();
        handle.create_customer(alice()).await.unwrap();
        assert_eq!(repo.customer_count(), 1);
    }
}
