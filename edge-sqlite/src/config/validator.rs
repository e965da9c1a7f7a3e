//! Structural validation of a parsed configuration.
//!
//! Validation never stops at the first finding: every omission in the tree
//! is logged and collected so operators see the complete picture in one
//! pass. The outcome is still a single gate, and one finding anywhere
//! rejects the whole configuration.

use std::collections::HashMap;
use std::fmt;

use crate::config::schema::{Column, Configuration, Database, Table};
use crate::error::{Error, Result};

/// What is wrong at a given location of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// A database entry has no `DbPath`.
    MissingDbPath,
    /// A table entry has no `TableName`.
    MissingTableName,
    /// A table entry declares no columns.
    NoColumns,
    /// A column entry has no `ColumnName`.
    MissingColumnName,
    /// A column entry has no `Type`.
    MissingColumnType,
    /// Two database aliases point at the same store path.
    DuplicateDbPath {
        /// The alias that claimed the path first.
        first_alias: String,
    },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDbPath => write!(f, "missing DbPath"),
            Self::MissingTableName => write!(f, "missing TableName"),
            Self::NoColumns => write!(f, "no columns"),
            Self::MissingColumnName => write!(f, "missing ColumnName"),
            Self::MissingColumnType => write!(f, "missing Type"),
            Self::DuplicateDbPath { first_alias } => {
                write!(f, "DbPath already used by '{first_alias}'")
            }
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted alias path of the offending entry, e.g. `db1.table1.col1`.
    pub location: String,
    /// What is wrong there.
    pub kind: IssueKind,
}

impl ValidationIssue {
    /// Creates an issue at `location`.
    #[must_use]
    pub fn new(location: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

/// The collected findings for one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether the configuration may be activated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Every finding, in tree order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Converts the report into the activation gate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] carrying every finding when
    /// the report is not clean.
    pub fn into_result(self) -> Result<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidConfiguration {
                issues: self.issues,
            })
        }
    }

    fn push(&mut self, location: String, kind: IssueKind) {
        let issue = ValidationIssue::new(location, kind);
        log::warn!("Configuration issue: {issue}");
        self.issues.push(issue);
    }
}

/// Validates a parsed configuration.
///
/// # Examples
///
/// ```
/// use edge_sqlite::config::{ConfigParser, ConfigValidator};
///
/// let config = ConfigParser::parse_str(r#"{"SQLiteConfigs": {"db": {}}}"#).unwrap();
/// let report = ConfigValidator::validate(&config);
/// assert!(!report.is_valid());
/// assert_eq!(report.issues()[0].to_string(), "db: missing DbPath");
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check every database, table and column and collect all findings.
    #[must_use]
    pub fn validate(config: &Configuration) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut claimed_paths: HashMap<&str, &str> = HashMap::new();

        for database in &config.databases {
            Self::validate_database(database, &mut report);

            if let Some(path) = present(database.path.as_deref()) {
                if let Some(first_alias) = claimed_paths.get(path) {
                    report.push(
                        database.alias.clone(),
                        IssueKind::DuplicateDbPath {
                            first_alias: (*first_alias).to_string(),
                        },
                    );
                } else {
                    claimed_paths.insert(path, database.alias.as_str());
                }
            }
        }

        if report.is_valid() && config.databases.is_empty() {
            log::warn!("Configuration declares no databases; every command will be dropped");
        }

        report
    }

    /// Validate and turn the outcome straight into the activation gate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any finding was recorded.
    pub fn check(config: &Configuration) -> Result<()> {
        Self::validate(config).into_result()
    }

    fn validate_database(database: &Database, report: &mut ValidationReport) {
        if present(database.path.as_deref()).is_none() {
            report.push(database.alias.clone(), IssueKind::MissingDbPath);
        }

        for table in &database.tables {
            let location = format!("{}.{}", database.alias, table.alias);
            Self::validate_table(&location, table, report);
        }
    }

    fn validate_table(location: &str, table: &Table, report: &mut ValidationReport) {
        if present(table.name.as_deref()).is_none() {
            report.push(location.to_string(), IssueKind::MissingTableName);
        }

        if table.columns.is_empty() {
            report.push(location.to_string(), IssueKind::NoColumns);
        }

        for column in &table.columns {
            Self::validate_column(&format!("{location}.{}", column.alias), column, report);
        }
    }

    fn validate_column(location: &str, column: &Column, report: &mut ValidationReport) {
        if present(column.name.as_deref()).is_none() {
            report.push(location.to_string(), IssueKind::MissingColumnName);
        }
        if present(column.sql_type.as_deref()).is_none() {
            report.push(location.to_string(), IssueKind::MissingColumnType);
        }
    }
}

/// A field counts as set only when it holds something other than whitespace.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
