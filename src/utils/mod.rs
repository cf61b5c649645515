//! Utility modules for web, DOM, and formatting operations.
//!
//! Provides:
//! - [`fetch_listing`], [`upload_files`] - Endpoint requests
//! - [`format_size`], [`substitute`], [`path_prefixes`] - Display helpers
//! - [`endpoint_url`] - Query URL building

pub mod dom;
pub mod fetch;
pub mod format;
mod url;

pub use fetch::{fetch_listing, upload_files};
pub use format::{format_size, path_prefixes, substitute};
pub use url::endpoint_url;
