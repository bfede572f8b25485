//! Analytics routes - Overview stats and charts
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_analytics, htmx_analytics_content, htmx_analytics_retry};
pub use page::page_analytics;
