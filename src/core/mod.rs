/// Core Module for rowdb
///
/// This module contains the fundamental components of the library: the
/// database layer (connection handling, statement construction, schema
/// introspection, row operations) and the shared error types used for
/// consistent error propagation throughout the crate.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{DbError, Result};
