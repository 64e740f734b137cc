/// Connection Handling Module
///
/// This module opens SQLite connections with the library's standard pragmas
/// applied. One `DatabaseManager` owns exactly one connection for its whole
/// lifetime; release is deterministic when the owner goes out of scope, not
/// tied to a finalizer.
use crate::config::DbConfig;
use crate::core::{DbError, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const JOURNAL_MODES: &[&str] = &["delete", "truncate", "persist", "memory", "wal", "off"];

/// Opens a database file with default settings.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    open_with_config(path, &DbConfig::default())
}

/// Opens an in-memory database with default settings.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    apply_pragmas(&conn, &DbConfig::default())?;
    Ok(conn)
}

/// Opens a database file and applies the configured pragmas.
///
/// # Errors
///
/// Returns `DbError::Engine` if the file cannot be opened and
/// `DbError::Config` if the configuration names an unknown journal mode.
pub fn open_with_config<P: AsRef<Path>>(path: P, config: &DbConfig) -> Result<Connection> {
    debug!("opening database at {:?}", path.as_ref());
    let conn = Connection::open(path)?;
    apply_pragmas(&conn, config)?;
    Ok(conn)
}

fn apply_pragmas(conn: &Connection, config: &DbConfig) -> Result<()> {
    if config.foreign_keys.unwrap_or(true) {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    } else {
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    }

    if let Some(mode) = &config.journal_mode {
        let mode = mode.to_lowercase();
        if !JOURNAL_MODES.contains(&mode.as_str()) {
            return Err(DbError::Config(format!("unknown journal mode '{}'", mode)));
        }
        // journal_mode reports the resulting mode back as a row
        conn.query_row(&format!("PRAGMA journal_mode = {}", mode), [], |_row| Ok(()))?;
    }

    if let Some(ms) = config.busy_timeout_ms {
        conn.busy_timeout(Duration::from_millis(ms))?;
    }

    Ok(())
}
