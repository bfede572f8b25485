//! Analytics overview view session

use crate::error::{CoreError, ANALYTICS_FALLBACK_MESSAGE};
use crate::fetch::{FetchGuard, FetchTicket};
use crate::models::AnalyticsReport;

/// What the analytics overview should show
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsView {
    Loading,
    Failed { message: String },
    Ready(AnalyticsReport),
}

#[derive(Debug)]
pub struct AnalyticsSession {
    view: AnalyticsView,
    fetches: FetchGuard,
}

impl Default for AnalyticsSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsSession {
    pub fn new() -> Self {
        Self {
            view: AnalyticsView::Loading,
            fetches: FetchGuard::new(),
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.view = AnalyticsView::Loading;
        self.fetches.issue()
    }

    /// Apply a fetch outcome unless a newer fetch superseded it
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<AnalyticsReport, CoreError>) -> bool {
        if !self.fetches.is_current(ticket) {
            log::debug!("Discarding stale analytics response {}", ticket.id());
            return false;
        }
        self.view = match result {
            Ok(report) => AnalyticsView::Ready(report),
            Err(error) => AnalyticsView::Failed {
                message: error.message_or(ANALYTICS_FALLBACK_MESSAGE),
            },
        };
        true
    }

    pub fn view(&self) -> &AnalyticsView {
        &self.view
    }
}
