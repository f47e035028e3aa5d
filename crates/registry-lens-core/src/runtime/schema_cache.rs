// crates/registry-lens-core/src/runtime/schema_cache.rs
// ============================================================================
// Module: Registry Lens Schema Cache
// Description: Long-TTL cache around introspection and field resolution.
// Purpose: Resolve the schema once per TTL window, fail closed otherwise.
// Dependencies: thiserror, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Schema resolution is computed once from introspection and cached for a
//! long TTL, independent of user sessions. The cache is invalidated only by
//! expiry or explicit refresh. Resolution failures are never retried
//! automatically; the diagnostic payload is surfaced to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::fields::FieldMapping;
use crate::core::fields::SchemaError;
use crate::core::fields::resolve_field_mapping;
use crate::core::query::TableName;
use crate::core::time::Timestamp;
use crate::interfaces::ExecutionError;
use crate::interfaces::SchemaIntrospector;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default cache lifetime for a resolved mapping, in milliseconds.
pub const DEFAULT_SCHEMA_TTL_MS: u64 = 86_400_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while producing a resolved field mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaResolveError {
    /// Introspection succeeded but the schema did not resolve.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Introspection itself failed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

// ============================================================================
// SECTION: Cache
// ============================================================================

/// Long-TTL cache of the resolved field mapping.
///
/// # Invariants
/// - Only successful resolutions are cached; failures are recomputed on the
///   next call.
#[derive(Debug, Clone)]
pub struct SchemaCache {
    /// Cache lifetime in milliseconds.
    cache_ttl_ms: u64,
    /// Cached mapping and the time it was resolved.
    cached: Option<(FieldMapping, Timestamp)>,
}

impl SchemaCache {
    /// Creates a cache with the given lifetime.
    #[must_use]
    pub const fn new(cache_ttl_ms: u64) -> Self {
        Self {
            cache_ttl_ms,
            cached: None,
        }
    }

    /// Returns the resolved mapping, introspecting only on cache miss.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaResolveError`] when introspection fails or fewer
    /// than six logical fields resolve; no mapping is cached in that case.
    pub fn resolve(
        &mut self,
        introspector: &dyn SchemaIntrospector,
        table: &TableName,
        now: Timestamp,
    ) -> Result<FieldMapping, SchemaResolveError> {
        if let Some((mapping, resolved_at)) = &self.cached
            && now.millis_since(*resolved_at) < self.cache_ttl_ms
        {
            return Ok(mapping.clone());
        }
        let columns = introspector.list_columns(table)?;
        let mapping = resolve_field_mapping(&columns)?;
        self.cached = Some((mapping.clone(), now));
        Ok(mapping)
    }

    /// Drops the cached mapping, forcing re-resolution on next use.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
