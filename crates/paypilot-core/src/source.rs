//! Data source abstraction
//!
//! Implementations deliver the full transaction set and the analytics
//! report. Any mechanism works (simulated, HTTP, database) as long as a
//! failure carries a displayable message.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::models::{AnalyticsReport, Transaction};

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the complete transaction set, newest first
    async fn fetch_transactions(&self) -> CoreResult<Vec<Transaction>>;

    /// Fetch the analytics overview
    async fn fetch_analytics(&self) -> CoreResult<AnalyticsReport>;
}

/// Shared data source handle
pub type SourceRef = Arc<dyn DataSource>;
