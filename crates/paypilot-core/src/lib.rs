//! Transaction table logic, view sessions and application context

pub mod analytics;
pub mod context;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod source;
pub mod types;

pub use analytics::{AnalyticsSession, AnalyticsView};
pub use context::{AppContext, AuthState, LoginErrors, User};
pub use controller::{AnalyticsController, TransactionsController};
pub use debounce::Debouncer;
pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use fetch::{FetchGuard, FetchTicket};
pub use models::{check_transactions, AnalyticsReport, AnalyticsStat, RevenuePoint, SuccessRatePoint, Transaction};
pub use pipeline::TransactionsPage;
pub use session::{FilterSnapshot, LoadState, SearchTicket, TransactionsSession, TransactionsView};
pub use source::{DataSource, SourceRef};
pub use types::{PageSize, SearchQuery, StatusFilter, TransactionStatus};

pub use paypilot_config::Theme;
