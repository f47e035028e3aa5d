// crates/registry-lens-core/src/lib.rs
// ============================================================================
// Module: Registry Lens Core
// Description: Safe query construction and bounded pagination for large
//              company registries.
// Purpose: Crate root wiring the pure core, collaborator interfaces, and
//          stateful runtime together.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Registry Lens turns interactive filter state into parametrized SQL over
//! a single wide registry table, with hard ceilings on how deep and how
//! often the table can be probed. The crate is storage-agnostic: hosts
//! supply [`interfaces::QueryExecutor`], [`interfaces::SchemaIntrospector`],
//! and [`interfaces::CatalogStatistics`] implementations, and every
//! time-sensitive operation takes an explicit [`core::time::Timestamp`].
//!
//! ## Layout
//! - [`core`]: pure data model (schema resolution, filters, query
//!   composition, pagination arithmetic, count estimates).
//! - [`interfaces`]: collaborator traits and the row shape crossing them.
//! - [`runtime`]: caches, admission, estimation, and the session pipeline.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::CountEstimate;
pub use crate::core::FieldMapping;
pub use crate::core::FilterSet;
pub use crate::core::FilterSetBuilder;
pub use crate::core::LogicalField;
pub use crate::core::NavControls;
pub use crate::core::PageAction;
pub use crate::core::PageSize;
pub use crate::core::PagerLimits;
pub use crate::core::PaginationState;
pub use crate::core::QueryBuilder;
pub use crate::core::SchemaError;
pub use crate::core::SqlQuery;
pub use crate::core::SqlValue;
pub use crate::core::TableName;
pub use crate::core::time::Timestamp;
pub use crate::interfaces::CatalogStatistics;
pub use crate::interfaces::CompanyRow;
pub use crate::interfaces::ExecutionError;
pub use crate::interfaces::QueryExecutor;
pub use crate::interfaces::SchemaIntrospector;
pub use crate::runtime::ExplorerSession;
pub use crate::runtime::FilterOptions;
pub use crate::runtime::Notice;
pub use crate::runtime::RequestBundle;
pub use crate::runtime::SchemaCache;
pub use crate::runtime::SessionConfig;
pub use crate::runtime::SubmitOutcome;
