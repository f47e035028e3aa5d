// crates/registry-lens-core/src/runtime/guard.rs
// ============================================================================
// Module: Registry Lens Admission Guard
// Description: Submission cooldown and heavy-query classification.
// Purpose: Bound submission frequency and flag likely full-table scans.
// Dependencies: serde, crate::core::{filter, time}
// ============================================================================

//! ## Overview
//! Two independent admission signals. The cooldown gate bounds how often
//! filter submissions reach the backing store, independent of query cost;
//! rejection is a normal control-flow branch, not an error. The heavy-query
//! policy classifies filter combinations that do not meaningfully narrow a
//! multi-million-row scan; the classification is advisory only and never
//! changes query construction. Thresholds are configurable because they are
//! heuristic judgment calls, not tuned constants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::filter::FilterSet;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default minimum delay between accepted submissions, in milliseconds.
pub const DEFAULT_COOLDOWN_MS: u64 = 2_000;
/// Default largest size-class selection still considered narrowing.
pub const DEFAULT_MAX_NARROW_SIZE_CLASSES: usize = 2;

// ============================================================================
// SECTION: Cooldown Gate
// ============================================================================

/// Outcome of a cooldown admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Admission {
    /// The submission may proceed.
    Ready,
    /// The cooldown window is still open.
    CoolingDown {
        /// Milliseconds until the next submission is accepted.
        remaining_ms: u64,
    },
}

/// Cooldown-based rate limiter for filter submissions.
///
/// # Invariants
/// - Only accepted submissions advance the cooldown window.
/// - A zero cooldown disables the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownGate {
    /// Minimum delay between accepted submissions, in milliseconds.
    cooldown_ms: u64,
    /// Timestamp of the last accepted submission.
    last_accepted: Option<Timestamp>,
}

impl CooldownGate {
    /// Creates a gate with the given cooldown window.
    #[must_use]
    pub const fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            last_accepted: None,
        }
    }

    /// Checks whether a submission at `now` is admitted.
    #[must_use]
    pub fn check(&self, now: Timestamp) -> Admission {
        let Some(last) = self.last_accepted else {
            return Admission::Ready;
        };
        let elapsed = now.millis_since(last);
        if elapsed >= self.cooldown_ms {
            Admission::Ready
        } else {
            Admission::CoolingDown {
                remaining_ms: self.cooldown_ms - elapsed,
            }
        }
    }

    /// Records an accepted submission at `now`.
    pub const fn record_accepted(&mut self, now: Timestamp) {
        self.last_accepted = Some(now);
    }
}

// ============================================================================
// SECTION: Heavy-Query Policy
// ============================================================================

/// Advisory cost classification for a filter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryWeight {
    /// At least one filter meaningfully narrows the scan.
    Narrow,
    /// No filter meaningfully narrows the scan; likely expensive.
    PotentiallyHeavy,
}

/// Heuristic that flags filter sets likely to force a full-table scan.
///
/// # Invariants
/// - Classification is advisory; it never blocks a submission and never
///   alters query construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeavyQueryPolicy {
    /// Largest size-class selection still considered narrowing.
    pub max_narrow_size_classes: usize,
}

impl Default for HeavyQueryPolicy {
    fn default() -> Self {
        Self {
            max_narrow_size_classes: DEFAULT_MAX_NARROW_SIZE_CLASSES,
        }
    }
}

impl HeavyQueryPolicy {
    /// Classifies a filter set.
    ///
    /// A set is potentially heavy when it has no substring, no capital
    /// bound, no specific nature or qualification, and a size-class
    /// selection that is either empty or wider than the narrow threshold.
    #[must_use]
    pub fn classify(&self, filter: &FilterSet) -> QueryWeight {
        if filter.name_contains().is_some()
            || filter.capital_min().is_some()
            || filter.capital_max().is_some()
        {
            return QueryWeight::Narrow;
        }
        if filter.legal_nature().is_some() || filter.qualification().is_some() {
            return QueryWeight::Narrow;
        }
        let selected = filter.size_classes().len();
        if selected > 0 && selected <= self.max_narrow_size_classes {
            return QueryWeight::Narrow;
        }
        QueryWeight::PotentiallyHeavy
    }
}
