//! Async controllers binding view sessions to a data source
//!
//! A controller is owned by one mounted view. Dropping it cancels the
//! pending search commit and any in-flight load.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::analytics::{AnalyticsSession, AnalyticsView};
use crate::debounce::Debouncer;
use crate::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::models::check_transactions;
use crate::session::{FilterSnapshot, SearchTicket, TransactionsSession, TransactionsView};
use crate::source::SourceRef;
use crate::types::{PageSize, StatusFilter};

// ==================== Transactions ====================

struct TransactionsShared {
    session: Mutex<TransactionsSession>,
    source: SourceRef,
    revision: watch::Sender<u64>,
    session_id: Option<String>,
}

impl TransactionsShared {
    fn notify(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    fn error_context(&self, operation: &str) -> ErrorContext {
        let context = ErrorContext::new(operation);
        match &self.session_id {
            Some(id) => context.with_session_id(id.clone()),
            None => context,
        }
    }

    async fn load(&self) {
        let ticket = self.session.lock().await.begin_fetch();
        self.notify();

        let result = self
            .source
            .fetch_transactions()
            .await
            .and_then(|records| check_transactions(&records).map(|()| records));
        match &result {
            Ok(transactions) => log::debug!("Fetched {} transactions", transactions.len()),
            Err(error) => DefaultErrorLogger.log_error(error, &self.error_context("load_transactions")),
        }

        if self.session.lock().await.finish_fetch(ticket, result) {
            self.notify();
        }
    }
}

pub struct TransactionsController {
    shared: Arc<TransactionsShared>,
    debouncer: Mutex<Debouncer>,
    loader: Mutex<Option<JoinHandle<()>>>,
}

impl TransactionsController {
    pub fn new(source: SourceRef, page_size: PageSize, debounce: Duration) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            shared: Arc::new(TransactionsShared {
                session: Mutex::new(TransactionsSession::new(page_size)),
                source,
                revision,
                session_id: None,
            }),
            debouncer: Mutex::new(Debouncer::new(debounce)),
            loader: Mutex::new(None),
        }
    }

    /// Tag error reports with the owning visitor session.
    /// Only valid before the controller is shared.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        if let Some(shared) = Arc::get_mut(&mut self.shared) {
            shared.session_id = Some(session_id.into());
        }
        self
    }

    /// Fetch the transaction set and wait for the outcome
    pub async fn load(&self) {
        self.shared.load().await;
    }

    /// Retrying is the same operation as the initial load
    pub async fn retry(&self) {
        self.load().await;
    }

    /// Start a load in the background, superseding any in-flight one
    pub async fn start_load(&self) {
        // enter the loading state before returning so callers render a skeleton
        self.shared.session.lock().await.begin_fetch();
        self.shared.notify();

        let shared = self.shared.clone();
        let handle = tokio::spawn(async move {
            shared.load().await;
        });
        if let Some(previous) = self.loader.lock().await.replace(handle) {
            previous.abort();
        }
    }

    /// Receives a new value on every observable change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    /// Record raw search input; the query commits after the debounce window
    pub async fn input_search(&self, raw: impl Into<String>) -> SearchTicket {
        // ticket order must match schedule order, or an older timer replaces the newest
        let mut debouncer = self.debouncer.lock().await;
        let ticket = self.shared.session.lock().await.set_search_input(raw);

        let shared = self.shared.clone();
        debouncer.schedule(async move {
            let committed = shared.session.lock().await.commit_search(ticket);
            if committed {
                shared.notify();
            }
        });
        ticket
    }

    /// Wait until `ticket` is committed or superseded, up to `timeout`.
    /// Returns false on timeout.
    pub async fn wait_for_search(&self, ticket: SearchTicket, timeout: Duration) -> bool {
        let mut changes = self.subscribe();
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.shared.session.lock().await.search_settled(ticket) {
                return true;
            }
            match tokio::time::timeout_at(deadline, changes.changed()).await {
                Ok(Ok(())) => continue,
                _ => return false,
            }
        }
    }

    pub async fn set_status(&self, status: StatusFilter) {
        self.shared.session.lock().await.set_status(status);
        self.shared.notify();
    }

    pub async fn set_page_size(&self, page_size: PageSize) {
        self.shared.session.lock().await.set_page_size(page_size);
        self.shared.notify();
    }

    pub async fn set_page(&self, page: usize) {
        self.shared.session.lock().await.set_page(page);
        self.shared.notify();
    }

    pub async fn next_page(&self) {
        self.shared.session.lock().await.next_page();
        self.shared.notify();
    }

    pub async fn previous_page(&self) {
        self.shared.session.lock().await.previous_page();
        self.shared.notify();
    }

    /// Reset search, status and page, dropping any pending search commit
    pub async fn clear_filters(&self) {
        self.debouncer.lock().await.cancel();
        self.shared.session.lock().await.clear_filters();
        self.shared.notify();
    }

    pub async fn view(&self) -> TransactionsView {
        self.shared.session.lock().await.view()
    }

    pub async fn filters(&self) -> FilterSnapshot {
        self.shared.session.lock().await.filters()
    }

    /// View and filters read under one lock
    pub async fn snapshot(&self) -> (TransactionsView, FilterSnapshot) {
        let mut session = self.shared.session.lock().await;
        let view = session.view();
        (view, session.filters())
    }
}

impl Drop for TransactionsController {
    fn drop(&mut self) {
        if let Some(handle) = self.loader.get_mut().take() {
            handle.abort();
        }
        self.debouncer.get_mut().cancel();
    }
}

// ==================== Analytics ====================

pub struct AnalyticsController {
    session: Arc<Mutex<AnalyticsSession>>,
    source: SourceRef,
    loader: Mutex<Option<JoinHandle<()>>>,
}

impl AnalyticsController {
    pub fn new(source: SourceRef) -> Self {
        Self {
            session: Arc::new(Mutex::new(AnalyticsSession::new())),
            source,
            loader: Mutex::new(None),
        }
    }

    async fn run_load(session: Arc<Mutex<AnalyticsSession>>, source: SourceRef) {
        let ticket = session.lock().await.begin_fetch();
        let result = source.fetch_analytics().await;
        if let Err(error) = &result {
            DefaultErrorLogger.log_error(error, &ErrorContext::new("load_analytics"));
        }
        session.lock().await.finish_fetch(ticket, result);
    }

    /// Fetch the analytics report and wait for the outcome
    pub async fn load(&self) {
        Self::run_load(self.session.clone(), self.source.clone()).await;
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    /// Start a load in the background
    pub async fn start_load(&self) {
        self.session.lock().await.begin_fetch();
        let handle = tokio::spawn(Self::run_load(self.session.clone(), self.source.clone()));
        if let Some(previous) = self.loader.lock().await.replace(handle) {
            previous.abort();
        }
    }

    pub async fn view(&self) -> AnalyticsView {
        self.session.lock().await.view().clone()
    }
}

impl Drop for AnalyticsController {
    fn drop(&mut self) {
        if let Some(handle) = self.loader.get_mut().take() {
            handle.abort();
        }
    }
}
