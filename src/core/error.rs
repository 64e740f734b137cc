/// rowdb Error Module
///
/// This module defines the error types for the library. The wrapper performs
/// no recovery: every failure from the execute chokepoint propagates
/// unchanged to the immediate caller.
use thiserror::Error;

/// Error type covering all failure classes of the library.
///
/// Engine-level failures (constraint violations, unknown tables or columns,
/// locking, I/O, malformed statements) arrive as structured `rusqlite`
/// errors and are passed through as `Engine`. The remaining variants are
/// raised by this layer itself before any SQL reaches the engine.
#[derive(Error, Debug)]
pub enum DbError {
    /// Errors reported by the underlying SQLite engine
    #[error("Engine error: {0}")]
    Engine(#[from] rusqlite::Error),

    /// Schema findings made by this layer, e.g. a table with no primary key
    #[error("Schema error: {0}")]
    Schema(String),

    /// A caller-side contract violation, e.g. an update payload missing the
    /// primary key column or a delete with empty criteria
    #[error("Precondition error: {0}")]
    Precondition(String),

    /// A table or column name failed the identifier allow-list check
    #[error("Invalid identifier: {0}")]
    Identifier(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result to use DbError as the error type.
pub type Result<T> = std::result::Result<T, DbError>;
