//! Data Transfer Objects for the HTTP API.
//!
//! Customer endpoints exchange `Customer` directly; only responses with no
//! store counterpart get their own type here.

use serde::{Deserialize, Serialize};

pub use crate::api::{Customer, CustomerId};

/// Response header listing batch ids that matched no customer.
pub const UNMATCHED_IDS_HEADER: &str = "x-unmatched-customer-ids";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Store status
    pub store: String,
    /// Number of customers currently stored
    pub customers: usize,
}
