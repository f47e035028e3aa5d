// crates/registry-lens-core/src/core/query.rs
// ============================================================================
// Module: Registry Lens Query Builder
// Description: Parametrized SELECT/COUNT/DISTINCT composition from filters.
// Purpose: Keep user data in bound parameters and trusted names in text.
// Dependencies: serde, crate::core::{fields, filter, pagination}
// ============================================================================

//! ## Overview
//! The builder turns a [`FilterSet`] into a single parametrized query. The
//! central injection-safety invariant: user-controlled data only ever
//! appears as named parameter values; the only interpolated tokens are
//! column names from the trusted [`FieldMapping`], the validated table
//! name, and internally clamped LIMIT/OFFSET integers. The row query and
//! the count query share one predicate path, so their WHERE clauses are
//! byte-identical for the same snapshot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;

use crate::core::fields::FieldMapping;
use crate::core::fields::LogicalField;
use crate::core::fields::SchemaError;
use crate::core::fields::validate_identifier;
use crate::core::filter::FilterSet;

// ============================================================================
// SECTION: Values and Queries
// ============================================================================

/// A value bound to a named query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// UTF-8 text value.
    Text(String),
    /// Double-precision numeric value.
    Real(f64),
    /// Integer value.
    Integer(i64),
}

/// A parametrized query: statement text plus named parameter bindings.
///
/// # Invariants
/// - Parameter names carry their `:` prefix and match the statement text.
/// - No user-controlled data appears in `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlQuery {
    /// Statement text with named placeholders.
    pub text: String,
    /// Named parameter bindings in placeholder order.
    pub params: Vec<(String, SqlValue)>,
}

// ============================================================================
// SECTION: Table Name
// ============================================================================

/// Validated physical table name safe for interpolation.
///
/// # Invariants
/// - The wrapped name passed identifier validation at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Creates a validated table name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidIdentifier`] when the name is not a
    /// plain SQL identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, SchemaError> {
        let name = name.into();
        validate_identifier(&name)?;
        Ok(Self(name))
    }

    /// Returns the table name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Composes parametrized queries for one table and field mapping.
///
/// # Invariants
/// - `build_select` and `build_count` share [`Self::append_predicates`], so
///   both emit byte-identical WHERE clauses for the same filter set.
/// - The emitted offset never exceeds `max_offset`, even if the caller
///   passes a larger value.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    /// Trusted table to query.
    table: TableName,
    /// Trusted logical-to-physical column mapping.
    mapping: FieldMapping,
    /// Defensive offset ceiling re-applied at build time.
    max_offset: u64,
}

impl QueryBuilder {
    /// Creates a builder for a table, mapping, and offset ceiling.
    #[must_use]
    pub const fn new(table: TableName, mapping: FieldMapping, max_offset: u64) -> Self {
        Self {
            table,
            mapping,
            max_offset,
        }
    }

    /// Returns the trusted field mapping backing this builder.
    #[must_use]
    pub const fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Builds the row query for a filter set and pagination window.
    ///
    /// The offset is re-clamped to the ceiling as a last line of defense;
    /// the pagination controller clamps first.
    #[must_use]
    pub fn build_select(&self, filter: &FilterSet, limit: u64, offset: u64) -> SqlQuery {
        let offset = offset.min(self.max_offset);
        let columns = LogicalField::ALL.map(|field| self.mapping.column(field)).join(", ");
        let mut text = format!("SELECT {columns} FROM {} WHERE 1=1", self.table);
        let mut params = Vec::new();
        self.append_predicates(filter, &mut text, &mut params);
        let order_column = self.mapping.column(LogicalField::DisplayName);
        let _ = write!(text, " ORDER BY {order_column} ASC LIMIT {limit} OFFSET {offset}");
        SqlQuery { text, params }
    }

    /// Builds the count query sharing the row query's predicate path.
    #[must_use]
    pub fn build_count(&self, filter: &FilterSet) -> SqlQuery {
        let mut text = format!("SELECT COUNT(*) FROM {} WHERE 1=1", self.table);
        let mut params = Vec::new();
        self.append_predicates(filter, &mut text, &mut params);
        SqlQuery { text, params }
    }

    /// Builds the unconditional DISTINCT query used for metadata options.
    ///
    /// Never composes filters; this is always a single-column scan with a
    /// hard row cap.
    #[must_use]
    pub fn build_distinct(&self, field: LogicalField, cap: u64) -> SqlQuery {
        let column = self.mapping.column(field);
        let text = format!(
            "SELECT DISTINCT {column} FROM {} WHERE {column} IS NOT NULL ORDER BY {column} ASC \
             LIMIT {cap}",
            self.table
        );
        SqlQuery {
            text,
            params: Vec::new(),
        }
    }

    /// Appends every active predicate to `text` and its bindings to
    /// `params`, in a fixed order.
    ///
    /// Absent filter attributes contribute no clause. Each clause binds its
    /// values as named parameters; the only interpolated tokens are mapped
    /// column names.
    fn append_predicates(
        &self,
        filter: &FilterSet,
        text: &mut String,
        params: &mut Vec<(String, SqlValue)>,
    ) {
        if let Some(substring) = filter.name_contains() {
            let column = self.mapping.column(LogicalField::DisplayName);
            let _ = write!(text, " AND UPPER({column}) LIKE UPPER(:name_pattern) ESCAPE '\\'");
            let pattern = format!("%{}%", escape_like_pattern(substring));
            params.push((":name_pattern".to_string(), SqlValue::Text(pattern)));
        }
        if !filter.size_classes().is_empty() {
            let column = self.mapping.column(LogicalField::SizeClass);
            let placeholders = (0 .. filter.size_classes().len())
                .map(|index| format!(":size_class_{index}"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(text, " AND {column} IN ({placeholders})");
            for (index, value) in filter.size_classes().iter().enumerate() {
                params.push((format!(":size_class_{index}"), SqlValue::Text(value.clone())));
            }
        }
        if let Some(value) = filter.legal_nature() {
            let column = self.mapping.column(LogicalField::LegalNature);
            let _ = write!(text, " AND {column} = :legal_nature");
            params.push((":legal_nature".to_string(), SqlValue::Text(value.to_string())));
        }
        if let Some(value) = filter.qualification() {
            let column = self.mapping.column(LogicalField::Qualification);
            let _ = write!(text, " AND {column} = :qualification");
            params.push((":qualification".to_string(), SqlValue::Text(value.to_string())));
        }
        if let Some(bound) = filter.capital_min() {
            let column = self.mapping.column(LogicalField::CapitalAmount);
            let _ = write!(text, " AND {column} >= :capital_min");
            params.push((":capital_min".to_string(), SqlValue::Real(bound)));
        }
        if let Some(bound) = filter.capital_max() {
            let column = self.mapping.column(LogicalField::CapitalAmount);
            let _ = write!(text, " AND {column} <= :capital_max");
            params.push((":capital_max".to_string(), SqlValue::Real(bound)));
        }
    }
}

// ============================================================================
// SECTION: Pattern Escaping
// ============================================================================

/// Escapes LIKE metacharacters so user text matches as literal containment.
///
/// The escape character is `\`, matching the `ESCAPE '\'` clause emitted by
/// the builder.
fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
