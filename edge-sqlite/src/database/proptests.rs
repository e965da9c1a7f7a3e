//! Property-based tests for DDL generation.

use super::schema::{create_table_sql, table_columns};
use crate::config::{Column, Table};
use proptest::prelude::*;
use rusqlite::Connection;

const TYPES: [&str; 4] = ["INTEGER", "TEXT", "REAL", "BLOB"];

// Distinct column names with a type index and key/not-null flags
fn table_strategy() -> impl Strategy<Value = Table> {
    prop::collection::btree_set("c_[a-z]{1,6}", 1..8)
        .prop_flat_map(|names| {
            let len = names.len();
            (
                Just(names.into_iter().collect::<Vec<_>>()),
                prop::collection::vec((0..TYPES.len(), any::<bool>(), any::<bool>()), len),
                0..len,
            )
        })
        .prop_map(|(names, flags, rotation)| {
            let mut columns: Vec<Column> = names
                .into_iter()
                .zip(flags)
                .map(|(name, (ty, is_key, not_null))| Column {
                    alias: format!("alias_{name}"),
                    name: Some(name),
                    sql_type: Some(TYPES[ty].to_string()),
                    is_key,
                    not_null,
                })
                .collect();
            columns.rotate_left(rotation);
            Table {
                alias: "t".into(),
                name: Some("t".into()),
                columns,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // The store ends up with exactly the declared columns, in declaration order
    #[test]
    fn ddl_creates_declared_columns_in_order(table in table_strategy()) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&create_table_sql(&table).unwrap()).unwrap();

        let info = table_columns(&conn, "t").unwrap();
        let created: Vec<_> = info.iter().map(|c| c.name.clone()).collect();
        let declared: Vec<_> = table.columns.iter().filter_map(|c| c.name.clone()).collect();
        prop_assert_eq!(created, declared);

        for (column, found) in table.columns.iter().zip(&info) {
            prop_assert_eq!(column.sql_type.as_deref(), Some(found.sql_type.as_str()));
            prop_assert_eq!(column.is_key, found.key_position > 0);
        }
    }

    // Key positions follow declaration order among key columns
    #[test]
    fn ddl_key_order_follows_declaration(table in table_strategy()) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&create_table_sql(&table).unwrap()).unwrap();

        let positions: Vec<u32> = table_columns(&conn, "t")
            .unwrap()
            .iter()
            .map(|c| c.key_position)
            .filter(|p| *p > 0)
            .collect();
        let expected: Vec<u32> = (1..=u32::try_from(positions.len()).unwrap()).collect();
        prop_assert_eq!(positions, expected);
    }

    // Re-running the statement never fails and never changes the schema
    #[test]
    fn ddl_is_idempotent(table in table_strategy()) {
        let conn = Connection::open_in_memory().unwrap();
        let sql = create_table_sql(&table).unwrap();
        conn.execute_batch(&sql).unwrap();
        let before = table_columns(&conn, "t").unwrap();
        conn.execute_batch(&sql).unwrap();
        prop_assert_eq!(before, table_columns(&conn, "t").unwrap());
    }

    // The PRIMARY KEY clause appears exactly when some column is a key
    #[test]
    fn ddl_primary_key_clause_presence(table in table_strategy()) {
        let sql = create_table_sql(&table).unwrap();
        let has_key = table.columns.iter().any(|c| c.is_key);
        prop_assert_eq!(sql.contains("PRIMARY KEY("), has_key);
    }
}
