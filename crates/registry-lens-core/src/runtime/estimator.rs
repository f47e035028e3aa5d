// crates/registry-lens-core/src/runtime/estimator.rs
// ============================================================================
// Module: Registry Lens Cardinality Estimator
// Description: Approximate totals, exact filtered counts, and inference.
// Purpose: Supply cheap order-of-magnitude figures and pay for exact counts
//          only when justified.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The approximate total comes from catalog statistics and is cached for a
//! long TTL because it is an order-of-magnitude figure, not a count. The
//! exact filtered count runs a real COUNT through the shared predicate path
//! and is never cached. When no exact count is justified, an undersized row
//! page pins the total exactly (no rows remain beyond it); a full page only
//! supports a lower bound.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::count::CountEstimate;
use crate::core::filter::FilterSet;
use crate::core::pagination::PageSize;
use crate::core::query::QueryBuilder;
use crate::core::query::TableName;
use crate::core::time::Timestamp;
use crate::interfaces::CatalogStatistics;
use crate::interfaces::ExecutionError;
use crate::interfaces::QueryExecutor;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default fallback when the catalog has no usable statistics.
pub const DEFAULT_FALLBACK_TOTAL: u64 = 5_000_000;
/// Default cache lifetime for the approximate total, in milliseconds.
pub const DEFAULT_ESTIMATE_TTL_MS: u64 = 86_400_000;

// ============================================================================
// SECTION: Config
// ============================================================================

/// Tunables for the cardinality estimator.
///
/// # Invariants
/// - `fallback_total` is at least 1; configuration validation enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Static total used when catalog statistics are absent or non-positive.
    pub fallback_total: u64,
    /// Cache lifetime for the approximate total, in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            fallback_total: DEFAULT_FALLBACK_TOTAL,
            cache_ttl_ms: DEFAULT_ESTIMATE_TTL_MS,
        }
    }
}

// ============================================================================
// SECTION: Estimator
// ============================================================================

/// Cardinality estimator with a long-TTL approximate-total cache.
///
/// # Invariants
/// - Exact filtered counts are never cached; filters vary per call.
#[derive(Debug, Clone)]
pub struct CardinalityEstimator {
    /// Estimator tunables.
    config: EstimatorConfig,
    /// Cached approximate total and the time it was computed.
    cached_total: Option<(u64, Timestamp)>,
}

impl CardinalityEstimator {
    /// Creates an estimator with the given tunables.
    #[must_use]
    pub const fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            cached_total: None,
        }
    }

    /// Returns the approximate unfiltered total for the table.
    ///
    /// Catalog failures and absent or non-positive statistics all fall back
    /// to the configured constant; the result (including the fallback) is
    /// cached until the TTL lapses.
    pub fn approximate_total(
        &mut self,
        statistics: &dyn CatalogStatistics,
        table: &TableName,
        now: Timestamp,
    ) -> u64 {
        if let Some((total, computed_at)) = self.cached_total
            && now.millis_since(computed_at) < self.config.cache_ttl_ms
        {
            return total;
        }
        let total = match statistics.approximate_rows(table) {
            Ok(Some(rows)) if rows > 0 => rows,
            Ok(_) | Err(_) => self.config.fallback_total,
        };
        self.cached_total = Some((total, now));
        total
    }

    /// Drops the cached approximate total.
    pub const fn invalidate(&mut self) {
        self.cached_total = None;
    }

    /// Runs the exact filtered count through the shared predicate path.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when the count query fails.
    pub fn exact_filtered_count(
        &self,
        executor: &dyn QueryExecutor,
        builder: &QueryBuilder,
        filter: &FilterSet,
    ) -> Result<u64, ExecutionError> {
        executor.fetch_count(&builder.build_count(filter))
    }
}

// ============================================================================
// SECTION: Inference
// ============================================================================

/// Infers a count estimate from a returned row page without a COUNT query.
///
/// An undersized page means no rows remain beyond it, so the total is
/// exactly `offset + rows_returned`. A full page only proves the total
/// exceeds the window, so the result degrades to a lower bound.
#[must_use]
pub fn infer_from_page(offset: u64, rows_returned: usize, page_size: PageSize) -> CountEstimate {
    let returned = u64::try_from(rows_returned).unwrap_or(u64::MAX);
    if returned < page_size.rows() {
        CountEstimate::Known(offset.saturating_add(returned))
    } else {
        CountEstimate::MoreThan(offset.saturating_add(page_size.rows()))
    }
}
