// crates/registry-lens-core/src/runtime/mod.rs
// ============================================================================
// Module: Registry Lens Runtime
// Description: Stateful orchestration over the pure core types.
// Purpose: Group caches, admission, estimation, and session wiring.
// Dependencies: crate::runtime submodules
// ============================================================================

//! ## Overview
//! Runtime components hold the mutable state the core types deliberately
//! avoid: cooldown timestamps, long-TTL caches, and the per-session request
//! pipeline. All of them take collaborator traits and an explicit timestamp
//! per call; nothing here reads a clock or touches a database directly.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod estimator;
pub mod guard;
pub mod metadata;
pub mod schema_cache;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use estimator::CardinalityEstimator;
pub use estimator::DEFAULT_ESTIMATE_TTL_MS;
pub use estimator::DEFAULT_FALLBACK_TOTAL;
pub use estimator::EstimatorConfig;
pub use estimator::infer_from_page;
pub use guard::Admission;
pub use guard::CooldownGate;
pub use guard::DEFAULT_COOLDOWN_MS;
pub use guard::DEFAULT_MAX_NARROW_SIZE_CLASSES;
pub use guard::HeavyQueryPolicy;
pub use guard::QueryWeight;
pub use metadata::DEFAULT_METADATA_TTL_MS;
pub use metadata::DEFAULT_SIZE_CLASS_CAP;
pub use metadata::DEFAULT_VALUE_CAP;
pub use metadata::FilterOptions;
pub use metadata::MetadataCaps;
pub use metadata::MetadataProvider;
pub use schema_cache::DEFAULT_SCHEMA_TTL_MS;
pub use schema_cache::SchemaCache;
pub use schema_cache::SchemaResolveError;
pub use session::ExplorerSession;
pub use session::Notice;
pub use session::PageView;
pub use session::RequestBundle;
pub use session::SessionConfig;
pub use session::SubmitOutcome;
