// crates/registry-lens-core/src/core/mod.rs
// ============================================================================
// Module: Registry Lens Core Types
// Description: Filter, schema, pagination, query, and count primitives.
// Purpose: Group the pure data model consumed by the runtime.
// Dependencies: crate::core submodules
// ============================================================================

//! ## Overview
//! Core types are pure: schema resolution, filter snapshots, query
//! composition, pagination arithmetic, and count estimates have no side
//! effects and no collaborator dependencies. The runtime module wires them
//! to executors per request.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod count;
pub mod fields;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use count::CountEstimate;
pub use fields::ColumnInfo;
pub use fields::FieldMapping;
pub use fields::LogicalField;
pub use fields::MAX_IDENTIFIER_LENGTH;
pub use fields::SchemaError;
pub use fields::resolve_field_mapping;
pub use fields::validate_identifier;
pub use filter::FilterSet;
pub use filter::FilterSetBuilder;
pub use pagination::ClampedOffset;
pub use pagination::DEFAULT_MAX_OFFSET;
pub use pagination::DEFAULT_MAX_PAGES;
pub use pagination::NavControls;
pub use pagination::PageAction;
pub use pagination::PageSize;
pub use pagination::PagerLimits;
pub use pagination::PaginationState;
pub use pagination::total_pages;
pub use query::QueryBuilder;
pub use query::SqlQuery;
pub use query::SqlValue;
pub use query::TableName;
pub use time::Timestamp;
