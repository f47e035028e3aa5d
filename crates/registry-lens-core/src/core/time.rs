// crates/registry-lens-core/src/core/time.rs
// ============================================================================
// Module: Registry Lens Time Model
// Description: Explicit timestamps for cooldown and cache-expiry arithmetic.
// Purpose: Keep the core deterministic by never reading wall-clock time.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core never reads wall-clock time. Hosts pass explicit [`Timestamp`]
//! values into every operation that needs one (cooldown checks, cache
//! expiry), which keeps admission and caching behavior replayable in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// A point in time expressed as unix epoch milliseconds.
///
/// # Invariants
/// - Values are supplied by the host; monotonicity is a caller responsibility.
/// - Arithmetic saturates rather than wrapping on out-of-order inputs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix epoch milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }

    /// Returns the milliseconds elapsed since `earlier`, clamped at zero when
    /// the host supplies out-of-order values.
    #[must_use]
    pub const fn millis_since(self, earlier: Self) -> u64 {
        let delta = self.0.saturating_sub(earlier.0);
        if delta < 0 { 0 } else { delta as u64 }
    }
}
