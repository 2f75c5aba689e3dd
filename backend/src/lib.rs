//! # CRM Backend
//!
//! In-memory customer management service.
//!
//! The crate keeps a single collection of customer records in process memory
//! and exposes it as a small REST API: list, fetch, create, update, delete and
//! batch-update customers. Nothing is persisted; the collection starts from a
//! fixed sample and is dropped on shutdown.
//!
//! ## Architecture
//!
//! - [`api`]: the `Customer` record and its id type
//! - [`db`]: the customer store (repository trait, in-memory implementation,
//!   service layer)
//! - [`config`]: TOML and environment configuration
//! - [`http`]: axum router, handlers and error mapping
//!
//! ## Concurrency
//!
//! Every store operation runs under one reader/writer lock, so concurrent
//! requests always observe a consistent collection and ids are never reused.

pub mod api;
pub mod config;
pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
