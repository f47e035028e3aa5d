// crates/registry-lens-core/src/core/count.rs
// ============================================================================
// Module: Registry Lens Count Estimate
// Description: Tagged result-cardinality estimate for one request.
// Purpose: Force callers to handle exact, lower-bound, and unknown totals.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A count is either exact, a lower bound, or unknown. The three cases are
//! a tagged enum rather than a magic null so display layers must handle all
//! of them: exact totals drive pagination, lower bounds degrade to
//! "more than N" messaging, and unknown totals disable navigation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Count Estimate
// ============================================================================

/// Result-cardinality estimate for the current filter set.
///
/// # Invariants
/// - `Known` comes from an exact COUNT or from undersized-page inference.
/// - `MoreThan` is a strict lower bound, never presented as a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CountEstimate {
    /// Exact number of matching rows.
    Known(u64),
    /// At least this many matching rows exist.
    MoreThan(u64),
    /// No justified estimate is available.
    Unknown,
}

impl CountEstimate {
    /// Returns the exact total when one is known.
    #[must_use]
    pub const fn known(self) -> Option<u64> {
        match self {
            Self::Known(total) => Some(total),
            Self::MoreThan(_) | Self::Unknown => None,
        }
    }
}
