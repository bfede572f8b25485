//! Transactions routes - Table with search, status filter and pagination
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and partial rendering

pub mod api;
pub mod page;

pub use api::{
    api_transactions, htmx_transactions_clear, htmx_transactions_list, htmx_transactions_page,
    htmx_transactions_page_size, htmx_transactions_retry, htmx_transactions_search, htmx_transactions_status,
};
pub use page::page_transactions;
