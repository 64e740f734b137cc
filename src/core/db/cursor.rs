/// Cursor Module
///
/// This module provides a forward-only handle over a query's result rows.
/// Results are not materialized when the cursor is created; the caller
/// drives fetching.
use crate::core::Result;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Row, Statement};

/// A forward-only handle over the rows of one SELECT statement.
///
/// The cursor holds the prepared statement together with the values to bind
/// and runs the query only when the caller fetches. Each fetched row is a
/// fixed-order tuple of values matching the requested column list, or the
/// full schema order for a `SELECT *`.
pub struct Cursor<'conn> {
    stmt: Statement<'conn>,
    values: Vec<Value>,
}

impl<'conn> Cursor<'conn> {
    pub(crate) fn new(stmt: Statement<'conn>, values: Vec<Value>) -> Self {
        Cursor { stmt, values }
    }

    /// Returns the column names of the result set.
    pub fn column_names(&self) -> Vec<String> {
        self.stmt.column_names().into_iter().map(String::from).collect()
    }

    /// Runs the query and returns every remaining row.
    pub fn fetch_all(self) -> Result<Vec<Vec<Value>>> {
        let Cursor { mut stmt, values } = self;
        let column_count = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(values.iter()))?;

        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(row_values(row, column_count)?);
        }
        Ok(result)
    }

    /// Runs the query and returns the first row, if any.
    pub fn fetch_one(self) -> Result<Option<Vec<Value>>> {
        let Cursor { mut stmt, values } = self;
        let column_count = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(values.iter()))?;

        match rows.next()? {
            Some(row) => Ok(Some(row_values(row, column_count)?)),
            None => Ok(None),
        }
    }
}

fn row_values(row: &Row, column_count: usize) -> rusqlite::Result<Vec<Value>> {
    let mut values = Vec::with_capacity(column_count);
    for index in 0..column_count {
        values.push(row.get::<_, Value>(index)?);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn setup_test_table(conn: &Connection) {
        conn.execute_batch(
            "
            CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT, value REAL);
            INSERT INTO test (name, value) VALUES ('Alice', 123.45);
            INSERT INTO test (name, value) VALUES ('Bob', 678.90);
            INSERT INTO test (name, value) VALUES (NULL, NULL);
        ",
        )
        .unwrap();
    }

    #[test]
    fn test_fetch_all() {
        let conn = Connection::open_in_memory().unwrap();
        setup_test_table(&conn);

        let stmt = conn.prepare("SELECT * FROM test ORDER BY id").unwrap();
        let cursor = Cursor::new(stmt, Vec::new());

        assert_eq!(cursor.column_names(), vec!["id", "name", "value"]);

        let rows = cursor.fetch_all().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            vec![
                Value::Integer(1),
                Value::Text("Alice".to_string()),
                Value::Real(123.45)
            ]
        );
        // NULL handling
        assert_eq!(rows[2][1], Value::Null);
    }

    #[test]
    fn test_fetch_one() {
        let conn = Connection::open_in_memory().unwrap();
        setup_test_table(&conn);

        let stmt = conn.prepare("SELECT name FROM test WHERE id = ?").unwrap();
        let cursor = Cursor::new(stmt, vec![Value::Integer(2)]);
        let row = cursor.fetch_one().unwrap().unwrap();
        assert_eq!(row, vec![Value::Text("Bob".to_string())]);

        let stmt = conn.prepare("SELECT name FROM test WHERE id = ?").unwrap();
        let cursor = Cursor::new(stmt, vec![Value::Integer(99)]);
        assert!(cursor.fetch_one().unwrap().is_none());
    }
}
