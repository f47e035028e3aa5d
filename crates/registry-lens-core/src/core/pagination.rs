// crates/registry-lens-core/src/core/pagination.rs
// ============================================================================
// Module: Registry Lens Pagination Controller
// Description: Bounded 1-based page state with hard offset/page ceilings.
// Purpose: Keep worst-case OFFSET scan cost bounded regardless of table size.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Pagination state is 1-based with a page size drawn from a small fixed
//! set. The derived offset is clamped to a configured ceiling and the page
//! count is capped, so navigation can never force an unbounded OFFSET scan.
//! Navigation beyond the exact-count horizon is disabled through
//! [`NavControls`] rather than silently clamped.
//!
//! Rule locked by tests: changing the page size preserves the current page;
//! only a filter submission resets navigation to page 1.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default ceiling for the derived row offset.
pub const DEFAULT_MAX_OFFSET: u64 = 10_000;
/// Default ceiling for the navigable page count.
pub const DEFAULT_MAX_PAGES: u64 = 500;

// ============================================================================
// SECTION: Page Size
// ============================================================================

/// Allowed page sizes for result navigation.
///
/// # Invariants
/// - The set is closed; arbitrary page sizes are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    /// Twenty rows per page.
    #[default]
    Twenty,
    /// Fifty rows per page.
    Fifty,
    /// One hundred rows per page.
    Hundred,
}

impl PageSize {
    /// All allowed page sizes in ascending order.
    pub const ALL: [Self; 3] = [Self::Twenty, Self::Fifty, Self::Hundred];

    /// Returns the page size as a row count.
    #[must_use]
    pub const fn rows(self) -> u64 {
        match self {
            Self::Twenty => 20,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    /// Returns the page size matching a row count, if allowed.
    #[must_use]
    pub const fn from_rows(rows: u64) -> Option<Self> {
        match rows {
            20 => Some(Self::Twenty),
            50 => Some(Self::Fifty),
            100 => Some(Self::Hundred),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Hard navigation ceilings applied to every request.
///
/// # Invariants
/// - Both ceilings are at least 1; configuration validation enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerLimits {
    /// Maximum derived row offset.
    pub max_offset: u64,
    /// Maximum navigable page count.
    pub max_pages: u64,
}

impl Default for PagerLimits {
    fn default() -> Self {
        Self {
            max_offset: DEFAULT_MAX_OFFSET,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Returns the navigable page count for an exact total, capped by limits.
#[must_use]
pub fn total_pages(exact_count: u64, page_size: PageSize, limits: &PagerLimits) -> u64 {
    exact_count.div_ceil(page_size.rows()).min(limits.max_pages)
}

// ============================================================================
// SECTION: Navigation Actions
// ============================================================================

/// Explicit navigation actions available to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    /// Jump to the first page.
    First,
    /// Step back one page.
    Previous,
    /// Step forward one page.
    Next,
    /// Jump to the last navigable page.
    Last,
}

/// Per-control enablement derived from page state and known totals.
///
/// # Invariants
/// - Forward controls are enabled only when an exact total is known and the
///   current page is before the last navigable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavControls {
    /// Jump-to-first enabled.
    pub first: bool,
    /// Step-back enabled.
    pub previous: bool,
    /// Step-forward enabled.
    pub next: bool,
    /// Jump-to-last enabled.
    pub last: bool,
}

impl NavControls {
    /// Derives control enablement for a page and an optionally-known total.
    #[must_use]
    pub fn for_page(page: u64, total_pages: Option<u64>) -> Self {
        let backward = page > 1;
        let forward = total_pages.is_some_and(|total| page < total);
        Self {
            first: backward,
            previous: backward,
            next: forward,
            last: forward,
        }
    }
}

// ============================================================================
// SECTION: Pagination State
// ============================================================================

/// Derived offset plus whether the ceiling forced a clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedOffset {
    /// Effective row offset, never above the configured ceiling.
    pub offset: u64,
    /// Whether the raw offset exceeded the ceiling.
    pub clamped: bool,
}

/// Current 1-based page and page size for one session.
///
/// # Invariants
/// - `page >= 1` at all times.
/// - The effective offset never exceeds `limits.max_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Current 1-based page number.
    page: u64,
    /// Current page size.
    page_size: PageSize,
}

impl PaginationState {
    /// Creates state positioned on page 1.
    #[must_use]
    pub const fn new(page_size: PageSize) -> Self {
        Self { page: 1, page_size }
    }

    /// Returns the current 1-based page.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Returns the current page size.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the unclamped offset derived from page and size.
    #[must_use]
    pub const fn raw_offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size.rows())
    }

    /// Returns the offset clamped to the configured ceiling.
    #[must_use]
    pub fn clamped_offset(&self, limits: &PagerLimits) -> ClampedOffset {
        let raw = self.raw_offset();
        if raw > limits.max_offset {
            ClampedOffset {
                offset: limits.max_offset,
                clamped: true,
            }
        } else {
            ClampedOffset {
                offset: raw,
                clamped: false,
            }
        }
    }

    /// Resets navigation to page 1; used on every filter submission.
    pub const fn reset_to_first(&mut self) {
        self.page = 1;
    }

    /// Changes the page size, preserving the current page.
    pub const fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
    }

    /// Applies a navigation action, clamping the result to
    /// `[1, total_pages]`.
    pub fn navigate(&mut self, action: PageAction, total_pages: u64) {
        let ceiling = total_pages.max(1);
        self.page = match action {
            PageAction::First => 1,
            PageAction::Previous => self.page.saturating_sub(1).max(1),
            PageAction::Next => self.page.saturating_add(1).min(ceiling),
            PageAction::Last => ceiling,
        };
    }

    /// Clamps the page down so the derived offset stays within the
    /// ceiling, returning whether a clamp occurred.
    pub fn clamp_to_offset_ceiling(&mut self, limits: &PagerLimits) -> bool {
        if self.raw_offset() <= limits.max_offset {
            return false;
        }
        self.page = limits.max_offset.div_euclid(self.page_size.rows()).saturating_add(1);
        true
    }
}
