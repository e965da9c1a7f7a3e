//! DDL generation and schema introspection.
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS`, so activation is
//! idempotent against a store that already holds the declared schema.
//! Existing tables are never altered.

use rusqlite::Connection;

use crate::config::{Column, Table};
use crate::error::{Error, Result};

/// Column metadata as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Declared type, verbatim.
    pub sql_type: String,
    /// Whether the column is `NOT NULL`.
    pub not_null: bool,
    /// 1-based position within the primary key, 0 when not a key column.
    pub key_position: u32,
}

/// Build the create-if-absent statement for a table.
///
/// Column definitions read `name type [NOT NULL]` in declaration order. Key
/// columns are listed in declaration order in a trailing `PRIMARY KEY(...)`
/// clause, which is left out when no column is a key.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the table or one of its columns is
/// missing a required field; validated configurations never hit this.
///
/// # Examples
///
/// ```
/// use edge_sqlite::config::{Column, Table};
/// use edge_sqlite::database::create_table_sql;
///
/// let table = Table {
///     alias: "t".into(),
///     name: Some("t".into()),
///     columns: vec![
///         Column { alias: "id".into(), name: Some("Id".into()), sql_type: Some("INTEGER".into()),
///                  is_key: true, not_null: true },
///         Column { alias: "v".into(), name: Some("Value".into()), sql_type: Some("TEXT".into()),
///                  is_key: false, not_null: false },
///     ],
/// };
///
/// assert_eq!(
///     create_table_sql(&table).unwrap(),
///     "CREATE TABLE IF NOT EXISTS t (Id INTEGER NOT NULL, Value TEXT, PRIMARY KEY(Id))"
/// );
/// ```
pub fn create_table_sql(table: &Table) -> Result<String> {
    let table_name = required(table.name.as_deref(), &table.alias, "TableName")?;
    if table.columns.is_empty() {
        return Err(Error::Validation {
            field: table.alias.clone(),
            message: "table declares no columns".into(),
        });
    }

    let mut definitions = table
        .columns
        .iter()
        .map(column_definition)
        .collect::<Result<Vec<_>>>()?;

    let keys = table
        .key_columns()
        .map(|c| required(c.name.as_deref(), &c.alias, "ColumnName"))
        .collect::<Result<Vec<_>>>()?;
    if !keys.is_empty() {
        definitions.push(format!("PRIMARY KEY({})", keys.join(", ")));
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {table_name} ({})",
        definitions.join(", ")
    ))
}

fn column_definition(column: &Column) -> Result<String> {
    let name = required(column.name.as_deref(), &column.alias, "ColumnName")?;
    let sql_type = required(column.sql_type.as_deref(), &column.alias, "Type")?;
    let mut definition = format!("{name} {sql_type}");
    if column.not_null {
        definition.push_str(" NOT NULL");
    }
    Ok(definition)
}

fn required<'a>(value: Option<&'a str>, alias: &str, field: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Validation {
            field: alias.to_string(),
            message: format!("missing {field}"),
        })
}

/// Report the columns of `table` as the store sees them.
///
/// Returns an empty list when the table does not exist.
///
/// # Errors
///
/// Returns an error if the introspection query fails.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let mut stmt = conn.prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map([table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                sql_type: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                key_position: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

/// Whether `table` exists in the store.
///
/// # Errors
///
/// Returns an error if the catalog query fails.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
