/// Schema Introspection Module
///
/// This module reads table metadata out of the engine on demand. Nothing is
/// cached: every lookup re-runs `PRAGMA table_info` so the answer always
/// reflects the live schema.
use crate::core::db::sql::validate_identifier;
use crate::core::Result;
use rusqlite::{Connection, Row};

/// Represents a database column with its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column position within the table
    pub cid: i64,
    /// Column name
    pub name: String,
    /// Declared type name (e.g. "INTEGER", "TEXT")
    pub type_name: String,
    /// Whether the column carries a NOT NULL constraint
    pub notnull: bool,
    /// Default value expression (if any)
    pub dflt_value: Option<String>,
    /// Whether this column is part of the primary key
    pub pk: bool,
}

impl Column {
    /// Creates a Column from a PRAGMA table_info result row.
    ///
    /// The slots are read positionally as SQLite defines them:
    /// 0 = cid, 1 = name, 2 = type, 3 = notnull, 4 = dflt_value, 5 = pk.
    /// The pk slot holds the column's 1-based position within the primary
    /// key, or 0 when the column is not part of it.
    fn from_pragma_row(row: &Row) -> rusqlite::Result<Self> {
        let pk_position: i64 = row.get(5)?;
        Ok(Column {
            cid: row.get(0)?,
            name: row.get(1)?,
            type_name: row.get(2)?,
            notnull: row.get(3)?,
            dflt_value: row.get(4)?,
            pk: pk_position != 0,
        })
    }
}

/// Retrieves the column descriptors for a table, in engine column order.
///
/// An unknown table yields an empty list, matching PRAGMA table_info.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<Column>> {
    validate_identifier(table)?;

    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let column_iter = stmt.query_map([], |row| Column::from_pragma_row(row))?;

    let mut columns = Vec::new();
    for column in column_iter {
        columns.push(column?);
    }
    Ok(columns)
}

/// Returns the primary key column name for a table, or `None` when no
/// column is flagged as primary key.
///
/// Composite keys are not supported by this layer: only the first
/// pk-flagged column in engine order is returned.
pub fn primary_key(conn: &Connection, table: &str) -> Result<Option<String>> {
    let columns = table_columns(conn, table)?;
    Ok(columns.into_iter().find(|c| c.pk).map(|c| c.name))
}

/// Lists the user-defined tables in the database.
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type='table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let name_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut names = Vec::new();
    for name in name_iter {
        names.push(name?);
    }
    Ok(names)
}

/// Checks whether a user-defined table exists.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    validate_identifier(table)?;
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
