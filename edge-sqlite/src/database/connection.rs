//! Store connection handles.
//!
//! A [`StoreConnection`] owns one native connection bound to one store
//! path. Statements on a handle are serialized by its mutex; handles for
//! different stores run in parallel. The handle closes its connection when
//! dropped, which happens once the active state owning it is retired.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rusqlite::fallible_iterator::FallibleIterator;
use rusqlite::types::ValueRef;
use rusqlite::{Batch, Connection, ErrorCode, OpenFlags, TransactionBehavior};

use crate::config::Table;
use crate::error::{Error, Result};

use super::config::DatabaseConfig;
use super::schema::{self, ColumnInfo};

/// Virtual machine steps between two deadline checks.
const PROGRESS_STEPS: i32 = 1000;

/// Text a SQL `NULL` is rendered as.
pub const NULL_TEXT: &str = "NULL";

/// Rows of a result set, every value rendered as text.
pub type Rows = Vec<Vec<String>>;

/// An open connection to one store.
///
/// # Examples
///
/// ```
/// use edge_sqlite::database::{DatabaseConfig, StoreConnection};
/// use std::time::Duration;
///
/// let store = StoreConnection::open(&DatabaseConfig::new(":memory:")).unwrap();
/// let rows = store.execute("SELECT 1, 'a'", Duration::from_secs(1)).unwrap();
/// assert_eq!(rows, vec![vec!["1".to_string(), "a".to_string()]]);
/// ```
#[derive(Debug)]
pub struct StoreConnection {
    path: String,
    conn: Mutex<Connection>,
}

impl StoreConnection {
    /// Opens the store described by `config`.
    ///
    /// This function will:
    /// - Create the store file and its parent directory when missing
    /// - Open the store read-write
    /// - Switch to WAL journaling with `synchronous = NORMAL`
    /// - Configure the busy timeout
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the parent directory cannot be created and
    /// [`Error::Connection`] if the store cannot be opened or configured.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let path = config.path.to_string_lossy().into_owned();

        if !config.is_memory() && !config.path.exists() {
            if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Self::connect(&config.path, flags, config.busy_timeout).map_err(|source| {
            Error::Connection {
                path: path.clone(),
                source,
            }
        })?;

        log::debug!("Opened store {path}");
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    fn connect(
        path: &std::path::Path,
        flags: OpenFlags,
        busy_timeout: Duration,
    ) -> rusqlite::Result<Connection> {
        let conn = Connection::open_with_flags(path, flags)?;

        // PRAGMA journal_mode returns a row, so it goes through query_row
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.busy_timeout(busy_timeout)?;
        Ok(conn)
    }

    /// The store path this handle is registered under.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create `table` unless it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the table definition is incomplete or the
    /// statement fails.
    pub fn create_table(&self, table: &Table) -> Result<()> {
        let sql = schema::create_table_sql(table)?;
        log::debug!("{}: {sql}", self.path);
        self.lock().execute_batch(&sql)?;
        Ok(())
    }

    /// Columns of `table` as the store reports them.
    ///
    /// # Errors
    ///
    /// Returns an error if the introspection query fails.
    pub fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        schema::table_columns(&self.lock(), table)
    }

    /// Whether `table` exists in this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        schema::table_exists(&self.lock(), table)
    }

    /// Execute `command` verbatim inside one transaction.
    ///
    /// Every statement of the command runs in order. The rows of the first
    /// statement that produces a result set are returned, each value
    /// rendered as text. The transaction commits when every statement
    /// succeeds and rolls back otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExecutionTimeout`] if the command runs past
    /// `timeout`, or [`Error::Database`] if any statement fails.
    pub fn execute(&self, command: &str, timeout: Duration) -> Result<Rows> {
        let mut conn = self.lock();
        let deadline = Instant::now().checked_add(timeout);

        Self::execute_in_transaction(&mut conn, command, deadline).map_err(|err| match err {
            Error::Database(ref source)
                if source.sqlite_error_code() == Some(ErrorCode::OperationInterrupted) =>
            {
                Error::ExecutionTimeout { timeout }
            }
            other => other,
        })
    }

    fn execute_in_transaction(
        conn: &mut Connection,
        command: &str,
        deadline: Option<Instant>,
    ) -> Result<Rows> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Some(deadline) = deadline {
            tx.progress_handler(PROGRESS_STEPS, Some(move || Instant::now() >= deadline));
        }
        let rows = run_batch(&tx, command);
        // Must be cleared before the transaction ends or a late rollback
        // could itself be interrupted.
        tx.progress_handler(0, None::<fn() -> bool>);

        let rows = rows?;
        tx.commit()?;
        Ok(rows)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn run_batch(conn: &Connection, command: &str) -> Result<Rows> {
    let mut batch = Batch::new(conn, command);
    let mut captured: Option<Rows> = None;

    while let Some(mut stmt) = batch.next()? {
        if stmt.column_count() == 0 {
            stmt.execute([])?;
            continue;
        }

        let columns = stmt.column_count();
        let mut rows = stmt.query([])?;
        if captured.is_some() {
            while rows.next()?.is_some() {}
            continue;
        }

        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns);
            for index in 0..columns {
                values.push(stringify(conn, row.get_ref(index)?)?);
            }
            result.push(values);
        }
        captured = Some(result);
    }

    Ok(captured.unwrap_or_default())
}

fn stringify(conn: &Connection, value: ValueRef<'_>) -> Result<String> {
    Ok(match value {
        ValueRef::Null => NULL_TEXT.to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => real_text(conn, f)?,
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    })
}

/// Renders a REAL with the store's own text conversion (`1.0`, `0.3`).
fn real_text(conn: &Connection, value: f64) -> Result<String> {
    let mut stmt = conn.prepare_cached("SELECT CAST(?1 AS TEXT)")?;
    Ok(stmt.query_row([value], |row| row.get(0))?)
}
