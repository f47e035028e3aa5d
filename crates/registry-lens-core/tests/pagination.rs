// crates/registry-lens-core/tests/pagination.rs
// ============================================================================
// Module: Pagination Controller Tests
// Description: Page arithmetic, clamping, and navigation control enablement.
// ============================================================================
//! ## Overview
//! Validates 1-based page state, the offset and page-count ceilings, and
//! the rule that forward navigation requires a known exact total.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use registry_lens_core::core::pagination::NavControls;
use registry_lens_core::core::pagination::PageAction;
use registry_lens_core::core::pagination::PageSize;
use registry_lens_core::core::pagination::PagerLimits;
use registry_lens_core::core::pagination::PaginationState;
use registry_lens_core::core::pagination::total_pages;

/// Page sizes are a closed set convertible to and from row counts.
#[test]
fn page_size_set_is_closed() {
    assert_eq!(PageSize::Twenty.rows(), 20);
    assert_eq!(PageSize::Fifty.rows(), 50);
    assert_eq!(PageSize::Hundred.rows(), 100);
    assert_eq!(PageSize::from_rows(50), Some(PageSize::Fifty));
    assert_eq!(PageSize::from_rows(25), None);
    assert_eq!(PageSize::default(), PageSize::Twenty);
}

/// Total pages round up and are capped by the page-count ceiling.
#[test]
fn total_pages_rounds_up_and_caps() {
    let limits = PagerLimits::default();
    assert_eq!(total_pages(0, PageSize::Twenty, &limits), 0);
    assert_eq!(total_pages(1, PageSize::Twenty, &limits), 1);
    assert_eq!(total_pages(20, PageSize::Twenty, &limits), 1);
    assert_eq!(total_pages(21, PageSize::Twenty, &limits), 2);
    assert_eq!(total_pages(5_000_000, PageSize::Twenty, &limits), 500);
    let wide = PagerLimits {
        max_offset: 10_000,
        max_pages: 1_000,
    };
    assert_eq!(total_pages(5_000_000, PageSize::Hundred, &wide), 1_000);
}

/// Offsets derive from 1-based pages and clamp at the ceiling.
#[test]
fn offset_derivation_and_clamping() {
    let limits = PagerLimits::default();
    let mut state = PaginationState::new(PageSize::Fifty);
    assert_eq!(state.page(), 1);
    assert_eq!(state.raw_offset(), 0);
    state.navigate(PageAction::Last, 300);
    assert_eq!(state.page(), 300);
    assert_eq!(state.raw_offset(), 14_950);
    let clamped = state.clamped_offset(&limits);
    assert!(clamped.clamped);
    assert_eq!(clamped.offset, 10_000);
    assert!(state.clamp_to_offset_ceiling(&limits));
    assert_eq!(state.page(), 201);
    assert_eq!(state.raw_offset(), 10_000);
    assert!(!state.clamp_to_offset_ceiling(&limits));
}

/// Navigation actions clamp to the navigable range.
#[test]
fn navigation_actions_stay_in_range() {
    let mut state = PaginationState::new(PageSize::Twenty);
    state.navigate(PageAction::Previous, 10);
    assert_eq!(state.page(), 1);
    state.navigate(PageAction::Next, 10);
    assert_eq!(state.page(), 2);
    state.navigate(PageAction::Last, 10);
    assert_eq!(state.page(), 10);
    state.navigate(PageAction::Next, 10);
    assert_eq!(state.page(), 10);
    state.navigate(PageAction::First, 10);
    assert_eq!(state.page(), 1);
}

/// Navigation against a zero-page result stays on page 1.
#[test]
fn navigation_with_empty_result() {
    let mut state = PaginationState::new(PageSize::Twenty);
    state.navigate(PageAction::Last, 0);
    assert_eq!(state.page(), 1);
    state.navigate(PageAction::Next, 0);
    assert_eq!(state.page(), 1);
}

/// Changing the page size preserves the current page; only filter
/// submissions reset to page 1.
#[test]
fn page_size_change_preserves_page() {
    let mut state = PaginationState::new(PageSize::Twenty);
    state.navigate(PageAction::Next, 100);
    state.navigate(PageAction::Next, 100);
    assert_eq!(state.page(), 3);
    state.set_page_size(PageSize::Hundred);
    assert_eq!(state.page(), 3);
    assert_eq!(state.raw_offset(), 200);
    state.reset_to_first();
    assert_eq!(state.page(), 1);
}

/// Forward controls require a known total; backward controls do not.
#[test]
fn nav_controls_follow_count_knowledge() {
    let unknown = NavControls::for_page(3, None);
    assert!(unknown.first);
    assert!(unknown.previous);
    assert!(!unknown.next);
    assert!(!unknown.last);

    let mid = NavControls::for_page(3, Some(10));
    assert!(mid.first && mid.previous && mid.next && mid.last);

    let first = NavControls::for_page(1, Some(10));
    assert!(!first.first && !first.previous);
    assert!(first.next && first.last);

    let last = NavControls::for_page(10, Some(10));
    assert!(last.first && last.previous);
    assert!(!last.next && !last.last);
}
