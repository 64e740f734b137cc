// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;

// Re-export the main entry points at the crate root
pub use crate::core::db::{Cursor, DatabaseManager};
pub use crate::core::{DbError, Result};
