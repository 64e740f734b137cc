/// Database Manager Module
///
/// The manager wraps a single SQLite connection and exposes table and row
/// operations that take ordered (column, value) pairs instead of SQL text.
/// Generated column lists and bound value lists always share one iteration
/// order, values are bound as positional parameters, and identifiers are
/// validated before they reach any statement.
use crate::config::DbConfig;
use crate::core::db::cursor::Cursor;
use crate::core::db::{connection, schema, sql};
use crate::core::{DbError, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use tracing::debug;

/// Row-level operations over one owned database connection.
///
/// The manager owns its connection for its entire lifetime; the connection
/// is released when the manager goes out of scope. All operations are
/// synchronous and blocking, and any engine failure propagates to the
/// caller on the same call.
pub struct DatabaseManager {
    conn: Connection,
}

impl DatabaseManager {
    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(DatabaseManager {
            conn: connection::open(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(DatabaseManager {
            conn: connection::open_in_memory()?,
        })
    }

    /// Opens the database file at `path` with the given configuration.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: &DbConfig) -> Result<Self> {
        Ok(DatabaseManager {
            conn: connection::open_with_config(path, config)?,
        })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs one write statement with positionally bound values.
    ///
    /// Every generated DDL/DML statement passes through here. Each call is a
    /// single engine statement and therefore atomic under SQLite's
    /// per-statement transaction: committed on success, rolled back by the
    /// engine on failure.
    fn execute(&self, statement: &str, values: &[Value]) -> Result<usize> {
        debug!("executing: {}", statement);
        let changed = self.conn.execute(statement, params_from_iter(values.iter()))?;
        Ok(changed)
    }

    /// Prepares one read statement and hands back a forward-only cursor.
    fn prepare(&self, statement: &str, values: Vec<Value>) -> Result<Cursor<'_>> {
        debug!("preparing: {}", statement);
        let stmt = self.conn.prepare(statement)?;
        Ok(Cursor::new(stmt, values))
    }

    /// Creates a table if it does not already exist.
    ///
    /// `columns` pairs each column name with its engine-syntax declaration,
    /// e.g. `("name", "text not null PRIMARY KEY")`. Re-invocation with the
    /// same schema is a no-op; re-invocation with a different schema for an
    /// existing table leaves the existing structure untouched (engine
    /// behavior of IF NOT EXISTS, not validated here).
    pub fn create_table(&self, table: &str, columns: &[(&str, &str)]) -> Result<()> {
        let statement = sql::create_table_sql(table, columns)?;
        self.execute(&statement, &[])?;
        Ok(())
    }

    /// Returns the table's primary key column name, or `None` when no
    /// column is flagged as primary key.
    pub fn get_primary_key(&self, table: &str) -> Result<Option<String>> {
        schema::primary_key(&self.conn, table)
    }

    /// Inserts one row.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Precondition` for empty `data`; engine errors for
    /// unknown columns or NOT NULL / PRIMARY KEY / UNIQUE violations
    /// propagate as `DbError::Engine`.
    pub fn add(&self, table: &str, data: &[(&str, Value)]) -> Result<()> {
        if data.is_empty() {
            return Err(DbError::Precondition(format!(
                "add to '{}' requires at least one column",
                table
            )));
        }

        let columns: Vec<&str> = data.iter().map(|(column, _)| *column).collect();
        let values: Vec<Value> = data.iter().map(|(_, value)| value.clone()).collect();

        let statement = sql::insert_sql(table, &columns)?;
        self.execute(&statement, &values)?;
        Ok(())
    }

    /// Updates the row identified by the primary key value in `data`.
    ///
    /// The primary key pair is extracted from `data` and used as the WHERE
    /// match; the remaining pairs become the SET clause, bound in their
    /// given order with the key value last. Matching zero rows is not an
    /// error; the affected row count is returned.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Schema` if the table has no primary key and
    /// `DbError::Precondition` if `data` lacks the primary key column or
    /// contains nothing besides it.
    pub fn update(&self, table: &str, data: &[(&str, Value)]) -> Result<usize> {
        let primary_key = self.get_primary_key(table)?.ok_or_else(|| {
            DbError::Schema(format!("table '{}' has no primary key", table))
        })?;

        let key_value = data
            .iter()
            .find(|(column, _)| *column == primary_key)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                DbError::Precondition(format!(
                    "update data for '{}' is missing the primary key column '{}'",
                    table, primary_key
                ))
            })?;

        let remaining: Vec<&(&str, Value)> = data
            .iter()
            .filter(|(column, _)| *column != primary_key)
            .collect();
        if remaining.is_empty() {
            return Err(DbError::Precondition(format!(
                "update data for '{}' contains only the primary key column",
                table
            )));
        }

        let columns: Vec<&str> = remaining.iter().map(|(column, _)| *column).collect();
        let mut values: Vec<Value> = remaining.iter().map(|(_, value)| value.clone()).collect();
        values.push(key_value);

        let statement = sql::update_sql(table, &columns, &primary_key)?;
        self.execute(&statement, &values)
    }

    /// Inserts or updates based on key presence in `data`.
    ///
    /// The decision is purely structural: if the table's primary key column
    /// name appears among the keys of `data`, the call delegates to
    /// `update`, otherwise to `add`. No row-existence check is made, so a
    /// payload that names the key column with a value not yet in the table
    /// updates zero rows instead of inserting. This is a documented sharp
    /// edge, not a guaranteed upsert.
    pub fn add_or_update(&self, table: &str, data: &[(&str, Value)]) -> Result<()> {
        let primary_key = self.get_primary_key(table)?;
        let key_present = match primary_key.as_deref() {
            Some(key) => data.iter().any(|(column, _)| *column == key),
            None => false,
        };

        if key_present {
            self.update(table, data)?;
            Ok(())
        } else {
            self.add(table, data)
        }
    }

    /// Deletes the rows matching the AND-combined equality criteria.
    ///
    /// Matching zero rows is not an error; the affected row count is
    /// returned. Empty criteria are rejected: deleting every row must be
    /// asked for explicitly with plain SQL, not by omission.
    pub fn delete(&self, table: &str, criteria: &[(&str, Value)]) -> Result<usize> {
        if criteria.is_empty() {
            return Err(DbError::Precondition(format!(
                "delete from '{}' requires explicit criteria",
                table
            )));
        }

        let columns: Vec<&str> = criteria.iter().map(|(column, _)| *column).collect();
        let values: Vec<Value> = criteria.iter().map(|(_, value)| value.clone()).collect();

        let statement = sql::delete_sql(table, &columns)?;
        self.execute(&statement, &values)
    }

    /// Selects rows, returning a forward-only cursor.
    ///
    /// * `columns` - projection list; `None` selects all columns in schema
    ///   order.
    /// * `criteria` - AND-combined equality matches; an empty slice matches
    ///   every row.
    /// * `order_by` - single column to sort by; `None` keeps the engine's
    ///   natural order.
    pub fn select<'conn>(
        &'conn self,
        table: &str,
        columns: Option<&[&str]>,
        criteria: &[(&str, Value)],
        order_by: Option<&str>,
    ) -> Result<Cursor<'conn>> {
        let criteria_columns: Vec<&str> = criteria.iter().map(|(column, _)| *column).collect();
        let values: Vec<Value> = criteria.iter().map(|(_, value)| value.clone()).collect();

        let statement = sql::select_sql(table, columns, &criteria_columns, order_by)?;
        self.prepare(&statement, values)
    }
}
