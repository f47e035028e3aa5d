// crates/registry-lens-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Explorer Store
// Description: SQLite executor, introspector, and statistics provider.
// Purpose: Execute core-composed queries with verbatim parameter binding.
// Dependencies: registry-lens-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements the three core collaborator traits over a single
//! `SQLite` connection. Introspection uses `pragma_table_info`; approximate
//! row counts come from `sqlite_stat1` when the database has been analyzed
//! and degrade to absent statistics otherwise. Database contents are
//! untrusted: row decoding fails closed on unexpected shapes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use registry_lens_core::core::fields::ColumnInfo;
use registry_lens_core::core::query::SqlQuery;
use registry_lens_core::core::query::SqlValue;
use registry_lens_core::core::query::TableName;
use registry_lens_core::interfaces::CatalogStatistics;
use registry_lens_core::interfaces::CompanyRow;
use registry_lens_core::interfaces::ExecutionError;
use registry_lens_core::interfaces::QueryExecutor;
use registry_lens_core::interfaces::SchemaIntrospector;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::ToSql;
use rusqlite::params;
use rusqlite::types::Value;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// Configuration for the `SQLite` explorer store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Filesystem failure while preparing the database path.
    #[error("sqlite io error: {0}")]
    Io(String),
    /// Database-level failure.
    #[error("sqlite error: {0}")]
    Db(String),
    /// Invalid store configuration.
    #[error("invalid sqlite store config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed explorer store.
///
/// # Invariants
/// - Query text is executed exactly as composed; parameters are bound by
///   name, never interpolated.
#[derive(Debug, Clone)]
pub struct SqliteExplorerStore {
    /// Shared connection handle.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteExplorerStore {
    /// Opens (or creates) the database at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is invalid or the
    /// connection cannot be opened.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let connection = Connection::open_with_flags(
            &config.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        connection
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Opens an in-memory database, primarily for tests.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the connection cannot be opened.
    pub fn open_in_memory() -> Result<Self, SqliteStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Runs raw statements against the store, for schema setup and seeding.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when any statement fails.
    pub fn execute_batch(&self, sql: &str) -> Result<(), SqliteStoreError> {
        let guard = self
            .connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))?;
        guard.execute_batch(sql).map_err(|err| SqliteStoreError::Db(err.to_string()))
    }

    /// Locks the connection for a trait-method call.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ExecutionError> {
        self.connection
            .lock()
            .map_err(|_| ExecutionError::Backend("mutex poisoned".to_string()))
    }
}

// ============================================================================
// SECTION: Trait Implementations
// ============================================================================

impl QueryExecutor for SqliteExplorerStore {
    fn fetch_companies(&self, query: &SqlQuery) -> Result<Vec<CompanyRow>, ExecutionError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare(&query.text)
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let bindings = owned_bindings(&query.params);
        let refs = binding_refs(&bindings);
        let mut rows = statement
            .query(refs.as_slice())
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let mut companies = Vec::new();
        loop {
            let row = match rows.next() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(err) => return Err(ExecutionError::Backend(err.to_string())),
            };
            companies.push(decode_company_row(row)?);
        }
        Ok(companies)
    }

    fn fetch_count(&self, query: &SqlQuery) -> Result<u64, ExecutionError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare(&query.text)
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let bindings = owned_bindings(&query.params);
        let refs = binding_refs(&bindings);
        let count: i64 = statement
            .query_row(refs.as_slice(), |row| row.get(0))
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        u64::try_from(count)
            .map_err(|_| ExecutionError::Malformed("count query returned a negative value".to_string()))
    }

    fn fetch_distinct_values(&self, query: &SqlQuery) -> Result<Vec<String>, ExecutionError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare(&query.text)
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let bindings = owned_bindings(&query.params);
        let refs = binding_refs(&bindings);
        let mut rows = statement
            .query(refs.as_slice())
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let mut values = Vec::new();
        loop {
            let row = match rows.next() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(err) => return Err(ExecutionError::Backend(err.to_string())),
            };
            let value: String = row
                .get(0)
                .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
            values.push(value);
        }
        Ok(values)
    }
}

impl SchemaIntrospector for SqliteExplorerStore {
    fn list_columns(&self, table: &TableName) -> Result<Vec<ColumnInfo>, ExecutionError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare("SELECT name, type FROM pragma_table_info(?1)")
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let mut rows = statement
            .query(params![table.as_str()])
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let mut columns = Vec::new();
        loop {
            let row = match rows.next() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(err) => return Err(ExecutionError::Backend(err.to_string())),
            };
            let name: String = row
                .get(0)
                .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
            let data_type: String = row
                .get(1)
                .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
            columns.push(ColumnInfo { name, data_type });
        }
        Ok(columns)
    }
}

impl CatalogStatistics for SqliteExplorerStore {
    fn approximate_rows(&self, table: &TableName) -> Result<Option<u64>, ExecutionError> {
        let guard = self.lock()?;
        let stat_table_exists: i64 = guard
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_stat1'",
                [],
                |row| row.get(0),
            )
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        if stat_table_exists == 0 {
            return Ok(None);
        }
        let mut statement = guard
            .prepare("SELECT stat FROM sqlite_stat1 WHERE tbl = ?1 LIMIT 1")
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let mut rows = statement
            .query(params![table.as_str()])
            .map_err(|err| ExecutionError::Backend(err.to_string()))?;
        let row = match rows.next() {
            Ok(Some(row)) => row,
            Ok(None) => return Ok(None),
            Err(err) => return Err(ExecutionError::Backend(err.to_string())),
        };
        let stat: String = row
            .get(0)
            .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
        Ok(parse_stat_rows(&stat))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts the core parameter list into owned `SQLite` values.
fn owned_bindings(params: &[(String, SqlValue)]) -> Vec<(String, Value)> {
    params
        .iter()
        .map(|(name, value)| {
            let converted = match value {
                SqlValue::Text(text) => Value::Text(text.clone()),
                SqlValue::Real(real) => Value::Real(*real),
                SqlValue::Integer(integer) => Value::Integer(*integer),
            };
            (name.clone(), converted)
        })
        .collect()
}

/// Borrows owned bindings in the shape `rusqlite` expects.
fn binding_refs(bindings: &[(String, Value)]) -> Vec<(&str, &dyn ToSql)> {
    bindings
        .iter()
        .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
        .collect()
}

/// Decodes one row in the fixed six-column projection order.
fn decode_company_row(row: &rusqlite::Row<'_>) -> Result<CompanyRow, ExecutionError> {
    let identifier: String = row
        .get(0)
        .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
    let display_name: String = row
        .get(1)
        .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
    let legal_nature: Option<String> = row
        .get(2)
        .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
    let qualification: Option<String> = row
        .get(3)
        .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
    let capital_amount: Option<f64> = row
        .get(4)
        .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
    let size_class: Option<String> = row
        .get(5)
        .map_err(|err| ExecutionError::Malformed(err.to_string()))?;
    Ok(CompanyRow {
        identifier,
        display_name,
        legal_nature,
        qualification,
        capital_amount,
        size_class,
    })
}

/// Parses the leading row-count token of a `sqlite_stat1` stat string.
fn parse_stat_rows(stat: &str) -> Option<u64> {
    stat.split_whitespace().next().and_then(|token| token.parse::<u64>().ok())
}

/// Validates the database path against length limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let text = path.to_string_lossy();
    if text.is_empty() {
        return Err(SqliteStoreError::Invalid("path must be non-empty".to_string()));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

/// Creates the parent directory of the database file when needed.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}
