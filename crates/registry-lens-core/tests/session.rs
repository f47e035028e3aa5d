// crates/registry-lens-core/tests/session.rs
// ============================================================================
// Module: Explorer Session Tests
// Description: End-to-end request pipeline over scripted collaborators.
// ============================================================================
//! ## Overview
//! Validates submission, cooldown gating, navigation clamping, advisory
//! notices, failure handling, and metadata loading through the session.

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

mod common;

use registry_lens_core::core::count::CountEstimate;
use registry_lens_core::core::filter::FilterSet;
use registry_lens_core::core::pagination::PageAction;
use registry_lens_core::core::pagination::PageSize;
use registry_lens_core::core::pagination::PagerLimits;
use registry_lens_core::core::time::Timestamp;
use registry_lens_core::interfaces::ExecutionError;
use registry_lens_core::runtime::session::ExplorerSession;
use registry_lens_core::runtime::session::Notice;
use registry_lens_core::runtime::session::RequestBundle;
use registry_lens_core::runtime::session::SessionConfig;
use registry_lens_core::runtime::session::SubmitOutcome;

use common::FixedStatistics;
use common::ScriptedStore;

/// Shorthand for a millisecond timestamp.
const fn at(millis: i64) -> Timestamp {
    Timestamp::from_unix_millis(millis)
}

/// Builds a session with default tunables over the fixture schema.
fn session() -> ExplorerSession {
    ExplorerSession::new(
        SessionConfig::default(),
        common::registry_table(),
        common::standard_mapping(),
    )
}

/// Unwraps an accepted submission.
fn accepted(outcome: SubmitOutcome) -> RequestBundle {
    match outcome {
        SubmitOutcome::Accepted(bundle) => *bundle,
        SubmitOutcome::Rejected { remaining_ms } => {
            panic!("submission unexpectedly rejected for {remaining_ms}ms")
        }
    }
}

/// An accepted submission runs the count and row queries and lands on
/// page 1 with a known total.
#[test]
fn accepted_submission_yields_known_count() {
    let mut session = session();
    let store = ScriptedStore::new();
    store.push_count(Ok(123));
    store.push_rows(Ok(common::companies(1, 20)));
    let filter = FilterSet::builder().name_contains("padaria").build();
    let bundle = accepted(session.submit_filters(filter, &store, at(0)));
    assert_eq!(bundle.count, CountEstimate::Known(123));
    assert_eq!(bundle.rows.len(), 20);
    assert_eq!(bundle.page.page, 1);
    assert_eq!(bundle.page.offset, 0);
    assert_eq!(bundle.page.total_pages, Some(7));
    assert!(bundle.controls.next);
    assert!(!bundle.controls.previous);
    assert!(bundle.notices.is_empty());
    assert!(bundle.query_text.contains(":name_pattern"));
    assert_eq!(store.count_queries.borrow().len(), 1);
    assert_eq!(store.row_queries.borrow().len(), 1);
}

/// Submissions inside the cooldown window are rejected without queries.
#[test]
fn cooldown_rejects_rapid_submissions() {
    let mut session = session();
    let store = ScriptedStore::new();
    store.push_count(Ok(5));
    store.push_rows(Ok(common::companies(1, 5)));
    let _ = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(0)));

    let outcome = session.submit_filters(FilterSet::unconstrained(), &store, at(500));
    assert_eq!(outcome, SubmitOutcome::Rejected { remaining_ms: 1_500 });
    assert_eq!(store.count_queries.borrow().len(), 1);

    store.push_count(Ok(5));
    store.push_rows(Ok(common::companies(1, 5)));
    let _ = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(2_000)));
    assert_eq!(store.count_queries.borrow().len(), 2);
}

/// A submission resets navigation to page 1.
#[test]
fn submission_resets_to_first_page() {
    let mut session = session();
    let store = ScriptedStore::new();
    store.push_count(Ok(200));
    store.push_rows(Ok(common::companies(1, 20)));
    let _ = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(0)));

    store.push_count(Ok(200));
    store.push_rows(Ok(common::companies(21, 20)));
    let step = session.navigate(PageAction::Next, &store);
    assert_eq!(step.page.page, 2);
    assert_eq!(step.page.offset, 20);

    store.push_count(Ok(80));
    store.push_rows(Ok(common::companies(1, 20)));
    let filter = FilterSet::builder().size_class("ME").build();
    let bundle = accepted(session.submit_filters(filter, &store, at(10_000)));
    assert_eq!(bundle.page.page, 1);
    assert_eq!(bundle.page.offset, 0);
}

/// Non-narrowing submissions carry the heavy-query notice.
#[test]
fn heavy_submission_is_flagged() {
    let mut session = session();
    let store = ScriptedStore::new();
    store.push_count(Ok(5_000_000));
    store.push_rows(Ok(common::companies(1, 20)));
    let bundle = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(0)));
    assert!(bundle.notices.contains(&Notice::HeavyQuery));

    store.push_count(Ok(10));
    store.push_rows(Ok(common::companies(1, 10)));
    let filter = FilterSet::builder().name_contains("padaria").build();
    let narrow = accepted(session.submit_filters(filter, &store, at(10_000)));
    assert!(!narrow.notices.contains(&Notice::HeavyQuery));
}

/// Deep navigation clamps to the ceilings and reports both notices.
#[test]
fn deep_navigation_is_clamped() {
    let config = SessionConfig {
        limits: PagerLimits {
            max_offset: 60,
            max_pages: 5,
        },
        ..SessionConfig::default()
    };
    let mut session = ExplorerSession::new(
        config,
        common::registry_table(),
        common::standard_mapping(),
    );
    let store = ScriptedStore::new();
    store.push_count(Ok(1_000));
    store.push_rows(Ok(common::companies(1, 20)));
    let bundle = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(0)));
    assert!(bundle.notices.contains(&Notice::PageLimitReached { max_pages: 5 }));
    assert_eq!(bundle.page.total_pages, Some(5));

    store.push_count(Ok(1_000));
    store.push_rows(Ok(common::companies(61, 20)));
    let last = session.navigate(PageAction::Last, &store);
    assert_eq!(last.page.page, 4);
    assert_eq!(last.page.offset, 60);
    assert!(last.notices.contains(&Notice::NavigationLimited { max_offset: 60 }));
}

/// Execution failures yield an empty bundle and leave the session usable.
#[test]
fn failure_yields_empty_bundle_and_recovers() {
    let mut session = session();
    let store = ScriptedStore::new();
    store.push_count(Err(ExecutionError::Backend("registry offline".to_string())));
    let bundle = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(0)));
    assert!(bundle.rows.is_empty());
    assert_eq!(bundle.count, CountEstimate::Unknown);
    assert_eq!(bundle.page.total_pages, None);
    assert!(!bundle.controls.next);
    assert!(bundle.notices.iter().any(|notice| matches!(
        notice,
        Notice::ExecutionFailed { message } if message.contains("registry offline")
    )));

    store.push_count(Ok(3));
    store.push_rows(Ok(common::companies(1, 3)));
    let recovered = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(5_000)));
    assert_eq!(recovered.count, CountEstimate::Known(3));
    assert_eq!(recovered.rows.len(), 3);
}

/// A failed row fetch after a successful count also fails closed.
#[test]
fn row_fetch_failure_discards_partial_results() {
    let mut session = session();
    let store = ScriptedStore::new();
    store.push_count(Ok(500));
    store.push_rows(Err(ExecutionError::Backend("timeout".to_string())));
    let bundle = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(0)));
    assert!(bundle.rows.is_empty());
    assert_eq!(bundle.count, CountEstimate::Unknown);
}

/// The initial view infers its count from the returned page.
#[test]
fn initial_view_infers_count() {
    let session = session();
    let store = ScriptedStore::new();
    store.push_rows(Ok(common::companies(1, 20)));
    let full = session.initial_view(&store);
    assert_eq!(full.count, CountEstimate::MoreThan(20));
    assert_eq!(full.page.total_pages, None);
    assert!(!full.controls.next);
    assert!(store.count_queries.borrow().is_empty());

    store.push_rows(Ok(common::companies(1, 7)));
    let undersized = session.initial_view(&store);
    assert_eq!(undersized.count, CountEstimate::Known(7));
    assert_eq!(undersized.page.total_pages, Some(1));
}

/// Changing the page size preserves the current page.
#[test]
fn page_size_change_preserves_position() {
    let mut session = session();
    let store = ScriptedStore::new();
    store.push_count(Ok(1_000));
    store.push_rows(Ok(common::companies(1, 20)));
    let _ = accepted(session.submit_filters(FilterSet::unconstrained(), &store, at(0)));

    store.push_count(Ok(1_000));
    store.push_rows(Ok(common::companies(21, 20)));
    let _ = session.navigate(PageAction::Next, &store);
    assert_eq!(session.pagination().page(), 2);

    session.set_page_size(PageSize::Hundred);
    assert_eq!(session.pagination().page(), 2);

    store.push_count(Ok(1_000));
    store.push_rows(Ok(common::companies(1, 100)));
    let bundle = session.navigate(PageAction::Next, &store);
    assert_eq!(bundle.page.page, 3);
    assert_eq!(bundle.page.page_size, 100);
    assert_eq!(bundle.page.offset, 200);
}

/// Metadata loads on demand, runs three capped scans, and caches.
#[test]
fn metadata_loads_and_caches() {
    let mut session = session();
    let store = ScriptedStore::new();
    store.push_distinct(Ok(vec!["ME".to_string(), "EPP".to_string()]));
    store.push_distinct(Ok(vec!["206-2".to_string()]));
    store.push_distinct(Ok(vec!["49".to_string()]));
    let options = session.load_metadata(&store, at(0)).unwrap();
    assert_eq!(options.size_classes, vec!["ME".to_string(), "EPP".to_string()]);
    assert_eq!(options.legal_natures, vec!["206-2".to_string()]);
    assert_eq!(options.qualifications, vec!["49".to_string()]);
    assert_eq!(store.distinct_queries.borrow().len(), 3);
    assert!(store.distinct_queries.borrow()[0].text.contains("LIMIT 10"));
    assert!(store.distinct_queries.borrow()[1].text.contains("LIMIT 50"));

    let cached = session.load_metadata(&store, at(60_000)).unwrap();
    assert_eq!(cached, options);
    assert_eq!(store.distinct_queries.borrow().len(), 3);
}

/// The approximate total flows through the session's estimator cache.
#[test]
fn approximate_total_uses_statistics() {
    let mut session = session();
    let stats = FixedStatistics {
        response: Ok(Some(4_500_000)),
    };
    assert_eq!(session.approximate_total(&stats, at(0)), 4_500_000);
    let changed = FixedStatistics {
        response: Ok(Some(1)),
    };
    assert_eq!(session.approximate_total(&changed, at(1_000)), 4_500_000);
}
