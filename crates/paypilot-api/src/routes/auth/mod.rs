//! Auth routes - Demo sign in, sign out and theme toggle
//!
//! Structure:
//! - api.rs: Form submissions
//! - page.rs: Login page rendering

pub mod api;
pub mod page;

pub use api::{htmx_login, logout, toggle_theme};
pub use page::page_login;
