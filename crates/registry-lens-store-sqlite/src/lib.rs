// crates/registry-lens-store-sqlite/src/lib.rs
// ============================================================================
// Module: Registry Lens SQLite Store Library
// Description: SQLite-backed implementations of the core collaborator traits.
// Purpose: Reference backing store for development and tests.
// Dependencies: registry-lens-core, rusqlite
// ============================================================================

//! ## Overview
//! `registry-lens-store-sqlite` implements the executor, introspector, and
//! catalog-statistics traits over a `SQLite` database. It binds the named
//! parameters the core composes, verbatim, and never rewrites query text.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteExplorerStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
