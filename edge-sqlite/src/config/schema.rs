//! Store configuration tree definitions.
//!
//! This module defines the nested databases → tables → columns model that a
//! configuration payload describes. Deserialization walks the payload in
//! document order so that column and key ordering survive into generated DDL.
//!
//! Every entry is keyed by an alias in the payload. The alias is kept on the
//! entry but is never used as a SQL identifier; `ColumnName`, `TableName` and
//! `DbPath` carry the literal values.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

/// Reserved database-level key that carries payload versioning, not a database.
pub const VERSION_KEY: &str = "$version";

/// Key holding the store path inside a database entry.
pub const DB_PATH_KEY: &str = "DbPath";

/// Key holding the SQL table name inside a table entry.
pub const TABLE_NAME_KEY: &str = "TableName";

/// A parsed store configuration.
///
/// # Examples
///
/// ```
/// use edge_sqlite::config::ConfigParser;
///
/// let config = ConfigParser::parse_str(r#"{
///     "SQLiteConfigs": {
///         "$version": 4,
///         "telemetry": { "DbPath": "/data/telemetry.db" }
///     }
/// }"#).unwrap();
///
/// assert_eq!(config.databases.len(), 1);
/// assert_eq!(config.databases[0].alias, "telemetry");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Databases in declaration order.
    pub databases: Vec<Database>,
}

/// One database entry: a store path and the tables it must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    /// Configuration-level alias of this database.
    pub alias: String,
    /// Filesystem location of the store (`DbPath`).
    pub path: Option<String>,
    /// Tables in declaration order.
    pub tables: Vec<Table>,
}

/// One table entry and its column schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Configuration-level alias of this table.
    pub alias: String,
    /// Literal SQL table name (`TableName`).
    pub name: Option<String>,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

/// One column definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Column {
    /// Configuration-level alias of this column.
    #[serde(skip)]
    pub alias: String,
    /// Literal SQL column name (`ColumnName`).
    #[serde(rename = "ColumnName")]
    pub name: Option<String>,
    /// Free-form SQL type, e.g. `INTEGER` or `TEXT` (`Type`).
    #[serde(rename = "Type")]
    pub sql_type: Option<String>,
    /// Whether the column is part of the primary key (`IsKey`).
    #[serde(rename = "IsKey", default)]
    pub is_key: bool,
    /// Whether the column is declared `NOT NULL` (`NotNull`).
    #[serde(rename = "NotNull", default)]
    pub not_null: bool,
}

impl Configuration {
    /// Looks up a database by its configuration alias.
    #[must_use]
    pub fn database(&self, alias: &str) -> Option<&Database> {
        self.databases.iter().find(|db| db.alias == alias)
    }

    /// Returns the total number of tables across all databases.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.databases.iter().map(|db| db.tables.len()).sum()
    }
}

impl Database {
    /// Looks up a table by its configuration alias.
    #[must_use]
    pub fn table(&self, alias: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.alias == alias)
    }
}

impl Table {
    /// Returns the columns marked `IsKey`, in declaration order.
    pub fn key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_key)
    }
}

/// Inserts `entry` or replaces an earlier entry with the same alias in place.
///
/// Repeated keys in a JSON object resolve to the last occurrence, at the
/// position of the first.
fn upsert<T>(entries: &mut Vec<T>, entry: T, alias_of: fn(&T) -> &str) {
    let alias = alias_of(&entry);
    if let Some(existing) = entries.iter_mut().find(|e| alias_of(e) == alias) {
        *existing = entry;
    } else {
        entries.push(entry);
    }
}

impl<'de> Deserialize<'de> for Configuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConfigurationVisitor;

        impl<'de> Visitor<'de> for ConfigurationVisitor {
            type Value = Configuration;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of database entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut databases = Vec::new();
                while let Some(alias) = map.next_key::<String>()? {
                    if alias == VERSION_KEY {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    let mut database: Database = map.next_value()?;
                    database.alias = alias;
                    upsert(&mut databases, database, |db| db.alias.as_str());
                }
                Ok(Configuration { databases })
            }
        }

        deserializer.deserialize_map(ConfigurationVisitor)
    }
}

impl<'de> Deserialize<'de> for Database {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DatabaseVisitor;

        impl<'de> Visitor<'de> for DatabaseVisitor {
            type Value = Database;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a database object with DbPath and table entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut database = Database::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == DB_PATH_KEY {
                        database.path = map.next_value()?;
                    } else {
                        let mut table: Table = map.next_value()?;
                        table.alias = key;
                        upsert(&mut database.tables, table, |t| t.alias.as_str());
                    }
                }
                Ok(database)
            }
        }

        deserializer.deserialize_map(DatabaseVisitor)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = Table;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table object with TableName and column entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = Table::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == TABLE_NAME_KEY {
                        table.name = map.next_value()?;
                    } else {
                        let mut column: Column = map.next_value()?;
                        column.alias = key;
                        upsert(&mut table.columns, column, |c| c.alias.as_str());
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
