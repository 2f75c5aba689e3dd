//! Repository implementations module.
//!
//! - `local`: in-memory customer store used by the server and the tests
pub mod local;

pub use local::LocalRepository;
