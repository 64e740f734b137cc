/// Database Module
///
/// This module provides the database layer of rowdb, organized into focused
/// submodules for separation of concerns:
///
/// - **Connection Handling** (`connection.rs`): Opens connections with the
///   standard pragmas; release is deterministic at scope exit
/// - **Statement Construction** (`sql.rs`): Builds parameterized SQL from
///   validated identifiers
/// - **Schema Introspection** (`schema.rs`): Reads column metadata and
///   primary keys via PRAGMA table_info
/// - **Cursors** (`cursor.rs`): Forward-only handles over query results
/// - **The Manager** (`manager.rs`): Row-level operations over one owned
///   connection
///
/// All database operations use the standardized `DbError` type for
/// consistent error propagation.
pub mod connection;
pub mod cursor;
pub mod manager;
pub mod schema;
pub mod sql;

pub use cursor::Cursor;
pub use manager::DatabaseManager;
pub use schema::Column;
