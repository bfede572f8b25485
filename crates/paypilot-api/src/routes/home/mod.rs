//! Landing page routes - Marketing site

pub mod page;

pub use page::page_home;
