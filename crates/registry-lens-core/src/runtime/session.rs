// crates/registry-lens-core/src/runtime/session.rs
// ============================================================================
// Module: Registry Lens Explorer Session
// Description: Session-scoped request orchestration for registry exploration.
// Purpose: Wire filters, pagination, admission, counting, and execution into
//          one bounded request pipeline.
// Dependencies: serde, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! An [`ExplorerSession`] owns the only mutable state in the engine: the
//! current filter snapshot, the pagination state, the cooldown timestamp,
//! and the long-TTL caches. State transitions happen synchronously on
//! discrete user actions (submit filters, navigate, load metadata); there
//! is no background work and no cross-session sharing.
//!
//! Execution failures are handled at this boundary: a failed query yields
//! an empty bundle with an unknown count and a notice, never a crash and
//! never a mix of stale and fresh data. The session remains usable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::count::CountEstimate;
use crate::core::filter::FilterSet;
use crate::core::pagination::ClampedOffset;
use crate::core::pagination::NavControls;
use crate::core::pagination::PageAction;
use crate::core::pagination::PageSize;
use crate::core::pagination::PagerLimits;
use crate::core::pagination::PaginationState;
use crate::core::pagination::total_pages;
use crate::core::query::QueryBuilder;
use crate::core::query::SqlValue;
use crate::core::query::TableName;
use crate::core::time::Timestamp;
use crate::interfaces::CatalogStatistics;
use crate::interfaces::CompanyRow;
use crate::interfaces::ExecutionError;
use crate::interfaces::QueryExecutor;
use crate::runtime::estimator::CardinalityEstimator;
use crate::runtime::estimator::EstimatorConfig;
use crate::runtime::estimator::infer_from_page;
use crate::runtime::guard::Admission;
use crate::runtime::guard::CooldownGate;
use crate::runtime::guard::DEFAULT_COOLDOWN_MS;
use crate::runtime::guard::HeavyQueryPolicy;
use crate::runtime::guard::QueryWeight;
use crate::runtime::metadata::DEFAULT_METADATA_TTL_MS;
use crate::runtime::metadata::FilterOptions;
use crate::runtime::metadata::MetadataCaps;
use crate::runtime::metadata::MetadataProvider;

// ============================================================================
// SECTION: Config
// ============================================================================

/// Tunables governing one explorer session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Hard navigation ceilings.
    pub limits: PagerLimits,
    /// Minimum delay between accepted filter submissions, in milliseconds.
    pub cooldown_ms: u64,
    /// Advisory heavy-query thresholds.
    pub heavy_query: HeavyQueryPolicy,
    /// Row caps for metadata scans.
    pub metadata_caps: MetadataCaps,
    /// Metadata cache lifetime in milliseconds.
    pub metadata_ttl_ms: u64,
    /// Cardinality estimator tunables.
    pub estimator: EstimatorConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            limits: PagerLimits::default(),
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            heavy_query: HeavyQueryPolicy::default(),
            metadata_caps: MetadataCaps::default(),
            metadata_ttl_ms: DEFAULT_METADATA_TTL_MS,
            estimator: EstimatorConfig::default(),
        }
    }
}

// ============================================================================
// SECTION: Request Surface
// ============================================================================

/// Advisory and diagnostic signals attached to a request bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The submitted filters do not meaningfully narrow the scan.
    HeavyQuery,
    /// Navigation was clamped to the configured offset ceiling.
    NavigationLimited {
        /// The offset ceiling that forced the clamp.
        max_offset: u64,
    },
    /// The result set spans more pages than the navigable ceiling.
    PageLimitReached {
        /// The page-count ceiling.
        max_pages: u64,
    },
    /// The backing-store call failed; the bundle carries no rows.
    ExecutionFailed {
        /// Human-readable failure description.
        message: String,
    },
}

/// Pagination view attached to a request bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    /// Current 1-based page.
    pub page: u64,
    /// Page size in rows.
    pub page_size: u64,
    /// Effective (clamped) row offset.
    pub offset: u64,
    /// Navigable page count when an exact total is known.
    pub total_pages: Option<u64>,
}

/// Everything the presentation layer needs to render one request.
///
/// # Invariants
/// - `rows` and `count` always describe the same filter snapshot.
/// - On execution failure `rows` is empty and `count` is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBundle {
    /// Executed (or attempted) statement text.
    pub query_text: String,
    /// Named parameters bound to the statement.
    pub parameters: Vec<(String, SqlValue)>,
    /// Result rows for the current page.
    pub rows: Vec<CompanyRow>,
    /// Cardinality estimate for the current filter snapshot.
    pub count: CountEstimate,
    /// Pagination view after clamping.
    pub page: PageView,
    /// Navigation control enablement.
    pub controls: NavControls,
    /// Advisory and diagnostic notices.
    pub notices: Vec<Notice>,
}

/// Outcome of a filter submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The cooldown window is still open; no query ran.
    Rejected {
        /// Milliseconds until the next submission is accepted.
        remaining_ms: u64,
    },
    /// The submission ran; the bundle carries the result.
    Accepted(Box<RequestBundle>),
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Session-scoped explorer state and request pipeline.
///
/// # Invariants
/// - One logical request at a time; no internal locking is needed.
/// - Filter submission resets navigation to page 1; a page-size change
///   preserves the current page.
pub struct ExplorerSession {
    /// Session tunables.
    config: SessionConfig,
    /// Query composition for the resolved table and mapping.
    builder: QueryBuilder,
    /// Table under exploration.
    table: TableName,
    /// Current immutable filter snapshot.
    filter: FilterSet,
    /// Current pagination state.
    pagination: PaginationState,
    /// Submission cooldown gate.
    gate: CooldownGate,
    /// Cardinality estimator with its approximate-total cache.
    estimator: CardinalityEstimator,
    /// Opt-in metadata option cache.
    metadata: MetadataProvider,
}

impl ExplorerSession {
    /// Creates a session for a resolved table and field mapping.
    #[must_use]
    pub fn new(
        config: SessionConfig,
        table: TableName,
        mapping: crate::core::fields::FieldMapping,
    ) -> Self {
        let builder = QueryBuilder::new(table.clone(), mapping, config.limits.max_offset);
        let gate = CooldownGate::new(config.cooldown_ms);
        let estimator = CardinalityEstimator::new(config.estimator);
        let metadata = MetadataProvider::new(config.metadata_caps, config.metadata_ttl_ms);
        Self {
            config,
            builder,
            table,
            filter: FilterSet::unconstrained(),
            pagination: PaginationState::new(PageSize::default()),
            gate,
            estimator,
            metadata,
        }
    }

    /// Returns the current filter snapshot.
    #[must_use]
    pub const fn filter(&self) -> &FilterSet {
        &self.filter
    }

    /// Returns the current pagination state.
    #[must_use]
    pub const fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Reports whether a submission at `now` would be admitted, so hosts
    /// can disable the submit control while cooling down.
    #[must_use]
    pub fn admission(&self, now: Timestamp) -> Admission {
        self.gate.check(now)
    }

    /// Changes the page size, preserving the current page.
    pub const fn set_page_size(&mut self, page_size: PageSize) {
        self.pagination.set_page_size(page_size);
    }

    /// Renders the current state without an exact count.
    ///
    /// Used for the first unfiltered page: the count is inferred from the
    /// returned row page (exact for an undersized page, a lower bound for
    /// a full one) rather than paid for with a COUNT query.
    #[must_use]
    pub fn initial_view(&self, executor: &dyn QueryExecutor) -> RequestBundle {
        let ClampedOffset { offset, clamped } =
            self.pagination.clamped_offset(&self.config.limits);
        let mut notices = Vec::new();
        if clamped {
            notices.push(Notice::NavigationLimited {
                max_offset: self.config.limits.max_offset,
            });
        }
        let query = self.builder.build_select(
            &self.filter,
            self.pagination.page_size().rows(),
            offset,
        );
        let rows = match executor.fetch_companies(&query) {
            Ok(rows) => rows,
            Err(error) => return self.failure_bundle(&error, notices),
        };
        let count = infer_from_page(offset, rows.len(), self.pagination.page_size());
        let known_pages = count.known().map(|total| {
            total_pages(total, self.pagination.page_size(), &self.config.limits)
        });
        RequestBundle {
            query_text: query.text,
            parameters: query.params,
            rows,
            count,
            page: self.page_view(offset, known_pages),
            controls: NavControls::for_page(self.pagination.page(), known_pages),
            notices,
        }
    }

    /// Applies a new filter snapshot, subject to the cooldown gate.
    ///
    /// An accepted submission resets navigation to page 1, records the
    /// cooldown timestamp, classifies the filters for the heavy-query
    /// warning, and recomputes rows and the exact count from the same
    /// predicate.
    pub fn submit_filters(
        &mut self,
        filter: FilterSet,
        executor: &dyn QueryExecutor,
        now: Timestamp,
    ) -> SubmitOutcome {
        if let Admission::CoolingDown { remaining_ms } = self.gate.check(now) {
            return SubmitOutcome::Rejected { remaining_ms };
        }
        self.gate.record_accepted(now);
        self.filter = filter;
        self.pagination.reset_to_first();
        let mut notices = Vec::new();
        if self.config.heavy_query.classify(&self.filter) == QueryWeight::PotentiallyHeavy {
            notices.push(Notice::HeavyQuery);
        }
        let bundle = match self.estimator.exact_filtered_count(
            executor,
            &self.builder,
            &self.filter,
        ) {
            Ok(count) => self.finish_request(executor, count, notices),
            Err(error) => self.failure_bundle(&error, notices),
        };
        SubmitOutcome::Accepted(Box::new(bundle))
    }

    /// Applies an explicit navigation action.
    ///
    /// The exact count is recomputed first so the target page can be
    /// clamped to the navigable range before any rows are fetched.
    pub fn navigate(&mut self, action: PageAction, executor: &dyn QueryExecutor) -> RequestBundle {
        let count = match self.estimator.exact_filtered_count(
            executor,
            &self.builder,
            &self.filter,
        ) {
            Ok(count) => count,
            Err(error) => return self.failure_bundle(&error, Vec::new()),
        };
        let navigable = total_pages(count, self.pagination.page_size(), &self.config.limits);
        self.pagination.navigate(action, navigable);
        self.finish_request(executor, count, Vec::new())
    }

    /// Loads (or reuses) the metadata option lists; explicit opt-in.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when a DISTINCT scan fails.
    pub fn load_metadata(
        &mut self,
        executor: &dyn QueryExecutor,
        now: Timestamp,
    ) -> Result<FilterOptions, ExecutionError> {
        self.metadata.load(executor, &self.builder, now)
    }

    /// Returns the cached approximate unfiltered total for the table.
    pub fn approximate_total(
        &mut self,
        statistics: &dyn CatalogStatistics,
        now: Timestamp,
    ) -> u64 {
        self.estimator.approximate_total(statistics, &self.table, now)
    }

    /// Completes a request once the exact count is known: clamps the page,
    /// fetches rows, and assembles the bundle.
    fn finish_request(
        &mut self,
        executor: &dyn QueryExecutor,
        count: u64,
        mut notices: Vec<Notice>,
    ) -> RequestBundle {
        let page_size = self.pagination.page_size();
        let navigable = total_pages(count, page_size, &self.config.limits);
        if count.div_ceil(page_size.rows()) >= self.config.limits.max_pages {
            notices.push(Notice::PageLimitReached {
                max_pages: self.config.limits.max_pages,
            });
        }
        if self.pagination.clamp_to_offset_ceiling(&self.config.limits) {
            notices.push(Notice::NavigationLimited {
                max_offset: self.config.limits.max_offset,
            });
        }
        let ClampedOffset { offset, .. } = self.pagination.clamped_offset(&self.config.limits);
        let query = self.builder.build_select(&self.filter, page_size.rows(), offset);
        let rows = match executor.fetch_companies(&query) {
            Ok(rows) => rows,
            Err(error) => return self.failure_bundle(&error, notices),
        };
        RequestBundle {
            query_text: query.text,
            parameters: query.params,
            rows,
            count: CountEstimate::Known(count),
            page: self.page_view(offset, Some(navigable)),
            controls: NavControls::for_page(self.pagination.page(), Some(navigable)),
            notices,
        }
    }

    /// Builds the no-partial-results bundle for a failed backing-store call.
    fn failure_bundle(&self, error: &ExecutionError, mut notices: Vec<Notice>) -> RequestBundle {
        notices.push(Notice::ExecutionFailed {
            message: error.to_string(),
        });
        let ClampedOffset { offset, .. } = self.pagination.clamped_offset(&self.config.limits);
        let query = self.builder.build_select(
            &self.filter,
            self.pagination.page_size().rows(),
            offset,
        );
        RequestBundle {
            query_text: query.text,
            parameters: query.params,
            rows: Vec::new(),
            count: CountEstimate::Unknown,
            page: self.page_view(offset, None),
            controls: NavControls::for_page(self.pagination.page(), None),
            notices,
        }
    }

    /// Assembles the pagination view for the current state.
    const fn page_view(&self, offset: u64, total_pages: Option<u64>) -> PageView {
        PageView {
            page: self.pagination.page(),
            page_size: self.pagination.page_size().rows(),
            offset,
            total_pages,
        }
    }
}
