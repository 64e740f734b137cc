use crate::core::{DbError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Connection configuration parsed from a TOML file.
///
/// Every field is optional; an absent field keeps the library default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DbConfig {
    /// Enforce foreign key constraints (default: true)
    pub foreign_keys: Option<bool>,
    /// Journal mode: delete, truncate, persist, memory, wal or off
    pub journal_mode: Option<String>,
    /// How long the engine waits on a locked database before failing
    pub busy_timeout_ms: Option<u64>,
}

/// Loads connection configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DbConfig> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| DbError::Config(e.to_string()))
}
