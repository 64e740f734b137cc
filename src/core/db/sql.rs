/// Statement Construction Module
///
/// This module builds the parameterized SQL text used by the database
/// manager. Table and column identifiers are interpolated into the statement
/// text, so every identifier passes an allow-list check first. Values are
/// never interpolated; they are always bound as positional parameters by the
/// caller.
use crate::core::{DbError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

// Column declarations are engine-syntax strings such as
// "integer not null PRIMARY KEY" or "text DEFAULT 'none'".
static DECLARATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_() ']*$").unwrap());

/// Checks a table or column name against the identifier allow-list.
///
/// # Errors
///
/// Returns `DbError::Identifier` if the name contains anything outside
/// `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_identifier(name: &str) -> Result<&str> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(name)
    } else {
        Err(DbError::Identifier(format!(
            "'{}' is not a valid table or column name",
            name
        )))
    }
}

/// Checks a column type declaration against the declaration allow-list.
pub fn validate_declaration(decl: &str) -> Result<&str> {
    if DECLARATION_RE.is_match(decl) {
        Ok(decl)
    } else {
        Err(DbError::Identifier(format!(
            "'{}' is not a valid column declaration",
            decl
        )))
    }
}

/// Builds `CREATE TABLE IF NOT EXISTS <table> (<col> <decl>, ...)`.
///
/// Column order in the generated statement follows the order of `columns`.
pub fn create_table_sql(table: &str, columns: &[(&str, &str)]) -> Result<String> {
    validate_identifier(table)?;
    let mut definitions = Vec::with_capacity(columns.len());
    for (name, declaration) in columns {
        validate_identifier(name)?;
        validate_declaration(declaration)?;
        definitions.push(format!("{} {}", name, declaration));
    }
    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        table,
        definitions.join(", ")
    ))
}

/// Builds `INSERT INTO <table> (<columns>) VALUES (?, ...)`.
///
/// The placeholder count equals the column count; the caller binds values
/// positionally in the same order as `columns`.
pub fn insert_sql(table: &str, columns: &[&str]) -> Result<String> {
    validate_identifier(table)?;
    for column in columns {
        validate_identifier(column)?;
    }
    let placeholders = vec!["?"; columns.len()].join(", ");
    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    ))
}

/// Builds `UPDATE <table> SET c = ?, ... WHERE <primary_key> = ?`.
///
/// The caller binds the `columns` values first and the primary key value
/// last.
pub fn update_sql(table: &str, columns: &[&str], primary_key: &str) -> Result<String> {
    validate_identifier(table)?;
    validate_identifier(primary_key)?;
    let mut assignments = Vec::with_capacity(columns.len());
    for column in columns {
        validate_identifier(column)?;
        assignments.push(format!("{} = ?", column));
    }
    Ok(format!(
        "UPDATE {} SET {} WHERE {} = ?",
        table,
        assignments.join(", "),
        primary_key
    ))
}

/// Builds `DELETE FROM <table> WHERE c = ? AND ...`.
pub fn delete_sql(table: &str, columns: &[&str]) -> Result<String> {
    validate_identifier(table)?;
    let mut predicates = Vec::with_capacity(columns.len());
    for column in columns {
        validate_identifier(column)?;
        predicates.push(format!("{} = ?", column));
    }
    Ok(format!(
        "DELETE FROM {} WHERE {}",
        table,
        predicates.join(" AND ")
    ))
}

/// Builds `SELECT <columns or *> FROM <table> [WHERE ...] [ORDER BY ...]`.
///
/// Criteria predicates are equality matches combined with AND, in the order
/// of `criteria_columns`; the caller binds the match values in that same
/// order.
pub fn select_sql(
    table: &str,
    columns: Option<&[&str]>,
    criteria_columns: &[&str],
    order_by: Option<&str>,
) -> Result<String> {
    validate_identifier(table)?;

    // An empty projection list means the same as no list: all columns.
    let projection = match columns {
        Some(names) if !names.is_empty() => {
            for name in names {
                validate_identifier(name)?;
            }
            names.join(", ")
        }
        _ => "*".to_string(),
    };

    let mut statement = format!("SELECT {} FROM {}", projection, table);

    if !criteria_columns.is_empty() {
        let mut predicates = Vec::with_capacity(criteria_columns.len());
        for column in criteria_columns {
            validate_identifier(column)?;
            predicates.push(format!("{} = ?", column));
        }
        statement.push_str(&format!(" WHERE {}", predicates.join(" AND ")));
    }

    if let Some(column) = order_by {
        validate_identifier(column)?;
        statement.push_str(&format!(" ORDER BY {}", column));
    }

    Ok(statement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("scores").is_ok());
        assert!(validate_identifier("_private").is_ok());
        assert!(validate_identifier("col_2").is_ok());

        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2col").is_err());
        assert!(validate_identifier("name; DROP TABLE users").is_err());
        assert!(validate_identifier("a-b").is_err());
        assert!(validate_identifier("name'").is_err());
    }

    #[test]
    fn test_validate_declaration() {
        assert!(validate_declaration("text").is_ok());
        assert!(validate_declaration("integer not null").is_ok());
        assert!(validate_declaration("text not null PRIMARY KEY").is_ok());
        assert!(validate_declaration("varchar(32) DEFAULT 'none'").is_ok());

        assert!(validate_declaration("text; DROP TABLE users").is_err());
        assert!(validate_declaration("").is_err());
    }

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql(
            "scores",
            &[("name", "text PRIMARY KEY"), ("math", "integer not null")],
        )
        .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS scores (name text PRIMARY KEY, math integer not null)"
        );
    }

    #[test]
    fn test_insert_sql_placeholder_count() {
        let sql = insert_sql("scores", &["number", "name", "math"]).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO scores (number, name, math) VALUES (?, ?, ?)"
        );
        assert_eq!(sql.matches('?').count(), 3);
    }

    #[test]
    fn test_update_sql() {
        let sql = update_sql("scores", &["math", "science"], "name").unwrap();
        assert_eq!(sql, "UPDATE scores SET math = ?, science = ? WHERE name = ?");
    }

    #[test]
    fn test_delete_sql() {
        let sql = delete_sql("scores", &["name", "math"]).unwrap();
        assert_eq!(sql, "DELETE FROM scores WHERE name = ? AND math = ?");
    }

    #[test]
    fn test_select_sql_defaults() {
        let sql = select_sql("scores", None, &[], None).unwrap();
        assert_eq!(sql, "SELECT * FROM scores");
    }

    #[test]
    fn test_select_sql_full() {
        let sql = select_sql(
            "scores",
            Some(&["name", "math"][..]),
            &["name"],
            Some("math"),
        )
        .unwrap();
        assert_eq!(
            sql,
            "SELECT name, math FROM scores WHERE name = ? ORDER BY math"
        );
    }

    #[test]
    fn test_injection_rejected_before_sql_is_built() {
        let result = select_sql("scores; DROP TABLE scores", None, &[], None);
        match result {
            Err(DbError::Identifier(_)) => {}
            _ => panic!("Expected Identifier error"),
        }

        let result = delete_sql("scores", &["name = 'x' OR 1=1 --"]);
        assert!(result.is_err());
    }
}
