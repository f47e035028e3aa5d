// crates/registry-lens-config/src/lib.rs
// ============================================================================
// Module: Registry Lens Config Library
// Description: Canonical config model and validation for registry-lens.toml.
// Purpose: Single source of truth for explorer configuration semantics.
// Dependencies: registry-lens-core, serde, toml
// ============================================================================

//! ## Overview
//! `registry-lens-config` defines the configuration model for Registry Lens
//! explorers. Loading is strict and fail-closed: size and path limits are
//! enforced before parsing, and every ceiling is validated before a config
//! is handed to the runtime.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::EstimatorSection;
pub use config::ExplorerConfig;
pub use config::HeavyQuerySection;
pub use config::LimitsSection;
pub use config::MetadataSection;
pub use config::SchemaSection;
