//! Property-based tests for configuration parsing and validation.

use super::parser::ConfigParser;
use super::validator::ConfigValidator;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

// Strategy for distinct column aliases with optional names/types
fn columns_strategy() -> impl Strategy<Value = Vec<(String, bool, bool, bool)>> {
    prop::collection::btree_set("[a-z]{1,8}", 1..8).prop_flat_map(|aliases| {
        let aliases: Vec<String> = aliases.into_iter().collect();
        let len = aliases.len();
        (
            Just(aliases),
            prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), len),
        )
            .prop_map(|(aliases, flags)| {
                aliases
                    .into_iter()
                    .zip(flags)
                    .map(|(alias, (named, typed, key))| (alias, named, typed, key))
                    .collect()
            })
    })
}

fn payload(columns: &[(String, bool, bool, bool)], shuffle_seed: usize) -> (Value, Vec<String>) {
    // Rotate so declaration order differs from lexical order
    let mut ordered: Vec<_> = columns.to_vec();
    let len = ordered.len();
    ordered.rotate_left(shuffle_seed % len);

    let mut table = Map::new();
    table.insert("TableName".into(), json!("t"));
    for (alias, named, typed, key) in &ordered {
        let mut column = Map::new();
        if *named {
            column.insert("ColumnName".into(), json!(alias.to_uppercase()));
        }
        if *typed {
            column.insert("Type".into(), json!("TEXT"));
        }
        column.insert("IsKey".into(), json!(key));
        table.insert(alias.clone(), Value::Object(column));
    }

    let aliases = ordered.iter().map(|c| c.0.clone()).collect();
    let value = json!({
        "SQLiteConfigs": {
            "$version": 1,
            "db": { "DbPath": "p.db", "t": Value::Object(table) }
        }
    });
    (value, aliases)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Parsing keeps columns in declaration order regardless of their names
    #[test]
    fn parse_preserves_column_order(columns in columns_strategy(), seed in 0usize..16) {
        let (value, expected) = payload(&columns, seed);
        let text = serde_json::to_string(&value).unwrap();

        let config = ConfigParser::parse_str(&text).unwrap();
        let aliases: Vec<String> = config.databases[0].tables[0]
            .columns
            .iter()
            .map(|c| c.alias.clone())
            .collect();
        prop_assert_eq!(aliases, expected);
    }

    // The gate is open exactly when every column has both a name and a type
    #[test]
    fn validation_gate_matches_completeness(columns in columns_strategy(), seed in 0usize..16) {
        let (value, _) = payload(&columns, seed);
        let config = ConfigParser::parse_value(&value).unwrap();

        let complete = columns.iter().all(|(_, named, typed, _)| *named && *typed);
        prop_assert_eq!(ConfigValidator::validate(&config).is_valid(), complete);
    }

    // Every missing field is reported: no short-circuit
    #[test]
    fn validation_reports_every_omission(columns in columns_strategy(), seed in 0usize..16) {
        let (value, _) = payload(&columns, seed);
        let config = ConfigParser::parse_value(&value).unwrap();

        let expected = columns
            .iter()
            .map(|(_, named, typed, _)| usize::from(!*named) + usize::from(!*typed))
            .sum::<usize>();
        prop_assert_eq!(ConfigValidator::validate(&config).issues().len(), expected);
    }
}
