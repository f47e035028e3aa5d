// crates/registry-lens-core/src/runtime/metadata.rs
// ============================================================================
// Module: Registry Lens Metadata Provider
// Description: Opt-in, capped, cached filter option lists.
// Purpose: Populate low-cardinality filter controls without automatic
//          DISTINCT scans.
// Dependencies: serde, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Filter options come from unconditional DISTINCT scans over single
//! columns, which are expensive on an unindexed multi-million-row table.
//! Loading is therefore explicitly opt-in: nothing here runs until a caller
//! asks, and the result is cached for a long TTL. Rebuilds are always full;
//! the cache is never patched incrementally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::fields::LogicalField;
use crate::core::query::QueryBuilder;
use crate::core::time::Timestamp;
use crate::interfaces::ExecutionError;
use crate::interfaces::QueryExecutor;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default cap for distinct size-class values.
pub const DEFAULT_SIZE_CLASS_CAP: u64 = 10;
/// Default cap for distinct legal-nature and qualification values.
pub const DEFAULT_VALUE_CAP: u64 = 50;
/// Default cache lifetime for loaded options, in milliseconds.
pub const DEFAULT_METADATA_TTL_MS: u64 = 86_400_000;

// ============================================================================
// SECTION: Caps
// ============================================================================

/// Row caps applied to each DISTINCT metadata scan.
///
/// # Invariants
/// - Caps are at least 1; configuration validation enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataCaps {
    /// Cap for distinct size-class values.
    pub size_class_cap: u64,
    /// Cap for distinct legal-nature and qualification values.
    pub value_cap: u64,
}

impl Default for MetadataCaps {
    fn default() -> Self {
        Self {
            size_class_cap: DEFAULT_SIZE_CLASS_CAP,
            value_cap: DEFAULT_VALUE_CAP,
        }
    }
}

// ============================================================================
// SECTION: Options
// ============================================================================

/// Distinct observed values for each low-cardinality filterable field.
///
/// # Invariants
/// - Lists are sorted ascending and capped per [`MetadataCaps`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterOptions {
    /// Distinct size-class values.
    pub size_classes: Vec<String>,
    /// Distinct legal-nature values.
    pub legal_natures: Vec<String>,
    /// Distinct qualification values.
    pub qualifications: Vec<String>,
}

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Lazily-loaded, long-TTL cache of filter options.
#[derive(Debug, Clone)]
pub struct MetadataProvider {
    /// Per-scan row caps.
    caps: MetadataCaps,
    /// Cache lifetime in milliseconds.
    cache_ttl_ms: u64,
    /// Cached options and the time they were loaded.
    cached: Option<(FilterOptions, Timestamp)>,
}

impl MetadataProvider {
    /// Creates a provider with the given caps and cache lifetime.
    #[must_use]
    pub const fn new(caps: MetadataCaps, cache_ttl_ms: u64) -> Self {
        Self {
            caps,
            cache_ttl_ms,
            cached: None,
        }
    }

    /// Returns whether a non-expired cache exists at `now`.
    #[must_use]
    pub fn is_loaded(&self, now: Timestamp) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|(_, loaded_at)| now.millis_since(*loaded_at) < self.cache_ttl_ms)
    }

    /// Loads filter options, reusing the cache while it is fresh.
    ///
    /// This is the explicit opt-in operation; it is never triggered by page
    /// rendering or navigation.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when any DISTINCT scan fails; on failure
    /// the previous cache is left untouched.
    pub fn load(
        &mut self,
        executor: &dyn QueryExecutor,
        builder: &QueryBuilder,
        now: Timestamp,
    ) -> Result<FilterOptions, ExecutionError> {
        if let Some((options, loaded_at)) = &self.cached
            && now.millis_since(*loaded_at) < self.cache_ttl_ms
        {
            return Ok(options.clone());
        }
        let size_classes = executor.fetch_distinct_values(
            &builder.build_distinct(LogicalField::SizeClass, self.caps.size_class_cap),
        )?;
        let legal_natures = executor.fetch_distinct_values(
            &builder.build_distinct(LogicalField::LegalNature, self.caps.value_cap),
        )?;
        let qualifications = executor.fetch_distinct_values(
            &builder.build_distinct(LogicalField::Qualification, self.caps.value_cap),
        )?;
        let options = FilterOptions {
            size_classes,
            legal_natures,
            qualifications,
        };
        self.cached = Some((options.clone(), now));
        Ok(options)
    }

    /// Drops the cached options, forcing a full rebuild on next load.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
