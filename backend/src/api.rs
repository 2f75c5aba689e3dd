//! Customer types shared by the store and the HTTP layer.
//!
//! `Customer` is both the stored record and the wire representation: every
//! endpoint reads and writes it as a flat JSON object.

use serde::{Deserialize, Deserializer, Serialize};

/// Customer identifier.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

impl CustomerId {
    pub fn new(value: i64) -> Self {
        CustomerId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CustomerId {
    fn from(value: i64) -> Self {
        CustomerId(value)
    }
}

/// A single customer record.
///
/// Missing or `null` JSON fields fall back to their zero value, so
/// `{"name":"Alice"}` is a valid request body. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Assigned by the store; ignored on create and on single-record update.
    #[serde(deserialize_with = "null_as_default")]
    pub id: CustomerId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    /// Whether the customer has already been contacted
    #[serde(deserialize_with = "null_as_default")]
    pub contacted: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Customer {
    /// Build a record without an id, for use as create/update input.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        contacted: bool,
    ) -> Self {
        Self {
            id: CustomerId::default(),
            name: name.into(),
            role: role.into(),
            email: email.into(),
            phone: phone.into(),
            contacted,
        }
    }

    /// Return the same record carrying `id`.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = id;
        self
    }
}

/// Id handed out by a freshly seeded store.
pub const SEED_NEXT_ID: CustomerId = CustomerId(4);

/// The sample records a seeded store starts with (ids 1-3).
pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer::new("John Doe", "Manager", "john@example.com", "123-456-7890", true)
            .with_id(CustomerId(1)),
        Customer::new("Jane Smith", "Developer", "jane@example.com", "987-654-3210", false)
            .with_id(CustomerId(2)),
        Customer::new("Emily Jones", "Designer", "emily@example.com", "555-555-5555", true)
            .with_id(CustomerId(3)),
    ]
}
