//! Transaction table view session
//!
//! Owns the fetched records and the filter state of one view instance.
//! All transitions are synchronous; timers and fetches live in
//! [`crate::controller`], which feeds their outcomes back in here.

use serde::Serialize;

use crate::error::CoreError;
use crate::fetch::{FetchGuard, FetchTicket};
use crate::models::Transaction;
use crate::pipeline::{self, TransactionsPage};
use crate::types::{PageSize, SearchQuery, StatusFilter};

/// Identifies one keystroke's pending commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Observable load state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed { message: String },
    Loaded,
}

/// What the transaction table should show
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionsView {
    Loading,
    /// Retryable fetch failure; no rows are shown alongside it
    Failed { message: String },
    /// Nothing matches. `filtered` tells "no matches" apart from "no data".
    Empty { filtered: bool },
    Ready(TransactionsPage),
}

/// Current control values, for re-rendering the filter bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSnapshot {
    pub search_input: String,
    pub query: SearchQuery,
    pub status: StatusFilter,
    pub page_size: PageSize,
    pub page: usize,
}

impl FilterSnapshot {
    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty() || self.status != StatusFilter::All
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterKey {
    revision: u64,
    query: SearchQuery,
    status: StatusFilter,
}

#[derive(Debug)]
struct FilterCache {
    key: FilterKey,
    indices: Vec<usize>,
}

#[derive(Debug)]
pub struct TransactionsSession {
    source: Vec<Transaction>,
    revision: u64,
    search_input: String,
    input_generation: u64,
    committed_generation: u64,
    query: SearchQuery,
    status: StatusFilter,
    page_size: PageSize,
    page: usize,
    load: LoadState,
    fetches: FetchGuard,
    cache: Option<FilterCache>,
}

impl TransactionsSession {
    /// A fresh session starts in the loading state
    pub fn new(page_size: PageSize) -> Self {
        Self {
            source: Vec::new(),
            revision: 0,
            search_input: String::new(),
            input_generation: 0,
            committed_generation: 0,
            query: SearchQuery::default(),
            status: StatusFilter::All,
            page_size,
            page: 1,
            load: LoadState::Loading,
            fetches: FetchGuard::new(),
            cache: None,
        }
    }

    // ==================== Search ====================

    /// Record a raw keystroke. The returned ticket commits it later.
    pub fn set_search_input(&mut self, raw: impl Into<String>) -> SearchTicket {
        self.search_input = raw.into();
        self.input_generation += 1;
        SearchTicket(self.input_generation)
    }

    /// Commit the raw input if no newer keystroke arrived since `ticket`.
    /// Returns false for a superseded ticket, which leaves state untouched.
    pub fn commit_search(&mut self, ticket: SearchTicket) -> bool {
        if ticket.0 != self.input_generation {
            log::debug!("Dropping superseded search commit {}", ticket.0);
            return false;
        }
        self.query = SearchQuery::commit(&self.search_input);
        self.committed_generation = ticket.0;
        self.page = 1;
        true
    }

    /// Whether `ticket` has been committed or superseded
    pub fn search_settled(&self, ticket: SearchTicket) -> bool {
        ticket.0 != self.input_generation || self.committed_generation >= ticket.0
    }

    // ==================== Selectors ====================

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Request a page; the stored page is clamped into range
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.reclamp();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Reset search, status and page in one step.
    /// Also invalidates any pending search commit.
    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        self.input_generation += 1;
        self.committed_generation = self.input_generation;
        self.query = SearchQuery::default();
        self.status = StatusFilter::All;
        self.page = 1;
    }

    // ==================== Fetch lifecycle ====================

    /// Enter the loading state for a new fetch
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.load = LoadState::Loading;
        self.fetches.issue()
    }

    /// Apply a fetch outcome. Returns false when a newer fetch has been
    /// issued since `ticket`, in which case the outcome is discarded.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Transaction>, CoreError>) -> bool {
        if !self.fetches.is_current(ticket) {
            log::debug!("Discarding stale fetch response {}", ticket.id());
            return false;
        }
        match result {
            Ok(transactions) => {
                self.source = transactions;
                self.revision += 1;
                self.load = LoadState::Loaded;
                self.reclamp();
            }
            Err(error) => {
                self.load = LoadState::Failed {
                    message: error.user_message(),
                };
            }
        }
        true
    }

    // ==================== Derived view ====================

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn filters(&self) -> FilterSnapshot {
        FilterSnapshot {
            search_input: self.search_input.clone(),
            query: self.query.clone(),
            status: self.status,
            page_size: self.page_size,
            page: self.page,
        }
    }

    /// Number of records passing the current filters
    pub fn filtered_count(&mut self) -> usize {
        self.filtered_indices().len()
    }

    /// Current table view
    pub fn view(&mut self) -> TransactionsView {
        match &self.load {
            LoadState::Loading => return TransactionsView::Loading,
            LoadState::Failed { message } => {
                return TransactionsView::Failed {
                    message: message.clone(),
                }
            }
            LoadState::Loaded => {}
        }

        self.reclamp();
        let filtered = !self.query.is_empty() || self.status != StatusFilter::All;
        let page_size = self.page_size;
        let page = self.page;
        let indices = self.filtered_indices().to_vec();
        if indices.is_empty() {
            return TransactionsView::Empty { filtered };
        }
        TransactionsView::Ready(pipeline::paginate_indices(&self.source, &indices, page_size, page))
    }

    /// Memoized filter stage keyed on (source revision, query, status)
    fn filtered_indices(&mut self) -> &[usize] {
        let key = FilterKey {
            revision: self.revision,
            query: self.query.clone(),
            status: self.status,
        };
        let stale = self.cache.as_ref().map_or(true, |c| c.key != key);
        if stale {
            let indices = pipeline::filter_indices(&self.source, &self.query, self.status);
            self.cache = Some(FilterCache { key, indices });
        }
        self.cache.as_ref().map(|c| c.indices.as_slice()).unwrap_or(&[])
    }

    /// Keep `page` within `[1, total_pages]`
    fn reclamp(&mut self) {
        let page_size = self.page_size;
        let total = pipeline::total_pages(self.filtered_count(), page_size);
        self.page = pipeline::clamp_page(self.page, total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn records(n: usize, status_of: impl Fn(usize) -> TransactionStatus) -> Vec<Transaction> {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                Transaction::new(
                    format!("txn_{:06}", 10000 + i),
                    Decimal::new(5000, 2),
                    status_of(i),
                    start - Duration::hours(i as i64),
                )
            })
            .collect()
    }

    fn loaded(n: usize) -> TransactionsSession {
        let mut session = TransactionsSession::new(PageSize::Ten);
        let ticket = session.begin_fetch();
        assert!(session.finish_fetch(ticket, Ok(records(n, |i| TransactionStatus::ALL[i % 3]))));
        session
    }

    fn ready(session: &mut TransactionsSession) -> TransactionsPage {
        match session.view() {
            TransactionsView::Ready(page) => page,
            other => panic!("expected ready view, got {:?}", other),
        }
    }

    #[test]
    fn test_starts_loading() {
        let mut session = TransactionsSession::new(PageSize::Ten);
        assert_eq!(session.view(), TransactionsView::Loading);
    }

    #[test]
    fn test_loaded_first_page() {
        let mut session = loaded(52);
        let page = ready(&mut session);
        assert_eq!(page.total_pages, 6);
        assert_eq!(page.rows.first().map(|t| t.id.as_str()), Some("txn_010000"));
        assert_eq!(page.rows.last().map(|t| t.id.as_str()), Some("txn_010009"));
    }

    #[test]
    fn test_superseded_search_never_commits() {
        let mut session = loaded(52);
        let first = session.set_search_input("txn_01000");
        let second = session.set_search_input("txn_01001");

        assert!(session.search_settled(first));
        assert!(!session.search_settled(second));
        assert!(!session.commit_search(first));
        assert!(session.filters().query.is_empty());

        assert!(session.commit_search(second));
        assert!(session.search_settled(second));
        assert_eq!(session.filters().query.as_str(), "txn_01001");
        assert_eq!(ready(&mut session).total_count, 10);
    }

    #[test]
    fn test_commit_normalizes_and_resets_page() {
        let mut session = loaded(52);
        session.set_page(4);
        let ticket = session.set_search_input("  TXN_0100 ");
        assert!(session.commit_search(ticket));
        let filters = session.filters();
        assert_eq!(filters.query.as_str(), "txn_0100");
        assert_eq!(filters.search_input, "  TXN_0100 ");
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_status_change_resets_page() {
        let mut session = loaded(52);
        session.set_page(3);
        session.set_status(StatusFilter::Pending);
        assert_eq!(session.page(), 1);
        let page = ready(&mut session);
        assert!(page.rows.iter().all(|t| t.status == TransactionStatus::Pending));
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut session = loaded(52);
        session.set_page(5);
        assert_eq!(session.page(), 5);

        session.set_page_size(PageSize::Twenty);
        let page = ready(&mut session);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut session = loaded(52);
        session.previous_page();
        assert_eq!(session.page(), 1);
        for _ in 0..10 {
            session.next_page();
        }
        assert_eq!(session.page(), 6);
        session.set_page(0);
        assert_eq!(session.page(), 1);
        session.set_page(usize::MAX);
        assert_eq!(session.page(), 6);
    }

    #[test]
    fn test_no_failed_records_gives_empty_state() {
        let mut session = TransactionsSession::new(PageSize::Ten);
        let ticket = session.begin_fetch();
        session.finish_fetch(ticket, Ok(records(20, |_| TransactionStatus::Success)));
        session.set_page(2);

        session.set_status(StatusFilter::Failed);
        assert_eq!(session.filtered_count(), 0);
        assert_eq!(session.page(), 1);
        assert_eq!(session.view(), TransactionsView::Empty { filtered: true });
    }

    #[test]
    fn test_empty_source_is_unfiltered_empty() {
        let mut session = loaded(0);
        assert_eq!(session.view(), TransactionsView::Empty { filtered: false });
    }

    #[test]
    fn test_clear_filters_is_atomic_and_idempotent() {
        let mut session = loaded(52);
        let ticket = session.set_search_input("txn_0101");
        session.commit_search(ticket);
        session.set_status(StatusFilter::Failed);

        let pending = session.set_search_input("txn_");
        session.clear_filters();
        let once = session.filters();
        assert_eq!(once.search_input, "");
        assert!(once.query.is_empty());
        assert_eq!(once.status, StatusFilter::All);
        assert_eq!(once.page, 1);
        assert!(!once.is_filtered());

        // a keystroke from before the clear must not resurface
        assert!(!session.commit_search(pending));

        session.clear_filters();
        assert_eq!(session.filters(), once);
        assert_eq!(ready(&mut session).total_count, 52);
    }

    #[test]
    fn test_shrinking_source_clamps_page() {
        let mut session = loaded(52);
        session.set_page(6);

        let ticket = session.begin_fetch();
        session.finish_fetch(ticket, Ok(records(15, |_| TransactionStatus::Success)));
        assert_eq!(session.page(), 2);
        assert_eq!(ready(&mut session).rows.len(), 5);
    }

    #[test]
    fn test_failure_then_retry() {
        let mut session = TransactionsSession::new(PageSize::Ten);
        let ticket = session.begin_fetch();
        session.finish_fetch(ticket, Err(CoreError::fetch_failed("Network unreachable")));
        assert_eq!(
            session.view(),
            TransactionsView::Failed { message: "Network unreachable".to_string() }
        );

        let retry = session.begin_fetch();
        assert_eq!(session.view(), TransactionsView::Loading);
        session.finish_fetch(retry, Ok(records(52, |_| TransactionStatus::Success)));
        assert_eq!(session.load_state(), &LoadState::Loaded);
        assert_eq!(ready(&mut session).total_count, 52);
    }

    #[test]
    fn test_failed_reload_hides_previous_rows() {
        let mut session = loaded(52);
        let ticket = session.begin_fetch();
        session.finish_fetch(ticket, Err(CoreError::fetch_failed("")));
        match session.view() {
            TransactionsView::Failed { message } => assert_eq!(message, "Failed to load transactions"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut session = TransactionsSession::new(PageSize::Ten);
        let stale = session.begin_fetch();
        let fresh = session.begin_fetch();

        assert!(session.finish_fetch(fresh, Ok(records(3, |_| TransactionStatus::Pending))));
        assert!(!session.finish_fetch(stale, Err(CoreError::fetch_failed("late"))));
        assert_eq!(ready(&mut session).total_count, 3);
    }
}
