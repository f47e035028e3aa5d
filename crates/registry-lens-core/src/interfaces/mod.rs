// crates/registry-lens-core/src/interfaces/mod.rs
// ============================================================================
// Module: Registry Lens Interfaces
// Description: Backend-agnostic collaborator contracts for query execution.
// Purpose: Define the seams between the core engine and the backing store.
// Dependencies: serde, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The core never talks to a database directly. Execution, schema
//! introspection, and catalog statistics are collaborator traits; the
//! engine composes parametrized queries and hands them across these seams.
//! Implementations must bind the supplied named parameters verbatim and
//! must not rewrite query text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::fields::ColumnInfo;
use crate::core::query::SqlQuery;
use crate::core::query::TableName;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Backing-store execution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages never embed bound parameter values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The backing store rejected or failed the call.
    #[error("query execution failed: {0}")]
    Backend(String),
    /// The backing store returned data the engine cannot interpret.
    #[error("query returned malformed data: {0}")]
    Malformed(String),
}

// ============================================================================
// SECTION: Result Rows
// ============================================================================

/// One company row projected onto the six logical fields.
///
/// # Invariants
/// - Field order matches [`crate::core::fields::LogicalField::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRow {
    /// Registry identifier.
    pub identifier: String,
    /// Company display name.
    pub display_name: String,
    /// Legal nature classification, when present.
    pub legal_nature: Option<String>,
    /// Responsible-party qualification, when present.
    pub qualification: Option<String>,
    /// Declared capital amount, when present.
    pub capital_amount: Option<f64>,
    /// Size class, when present.
    pub size_class: Option<String>,
}

// ============================================================================
// SECTION: Query Executor
// ============================================================================

/// Executes parametrized queries against the backing store.
pub trait QueryExecutor {
    /// Fetches company rows for a row query.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when execution or row decoding fails.
    fn fetch_companies(&self, query: &SqlQuery) -> Result<Vec<CompanyRow>, ExecutionError>;

    /// Fetches the scalar result of a count query.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when execution fails or the result is not
    /// a non-negative integer.
    fn fetch_count(&self, query: &SqlQuery) -> Result<u64, ExecutionError>;

    /// Fetches the single-column result of a DISTINCT metadata query.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when execution or value decoding fails.
    fn fetch_distinct_values(&self, query: &SqlQuery) -> Result<Vec<String>, ExecutionError>;
}

// ============================================================================
// SECTION: Schema Introspection
// ============================================================================

/// Discovers the physical columns of the registry table.
pub trait SchemaIntrospector {
    /// Lists the columns of `table` with their reported types.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when introspection fails.
    fn list_columns(&self, table: &TableName) -> Result<Vec<ColumnInfo>, ExecutionError>;
}

// ============================================================================
// SECTION: Catalog Statistics
// ============================================================================

/// Supplies cheap storage-statistics row estimates.
pub trait CatalogStatistics {
    /// Returns the catalog's approximate row count for `table`, or `None`
    /// when no statistics exist.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when the statistics lookup itself fails.
    fn approximate_rows(&self, table: &TableName) -> Result<Option<u64>, ExecutionError>;
}
