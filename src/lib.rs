//! Finder-style panel browser widget for Leptos.
//!
//! Directories open as panels left to right; selecting an entry drills down
//! into a new panel, files are shown by the first matching renderer of a
//! [`RendererRegistry`]. Directory panels accept dropped files when an
//! upload endpoint is configured.
//!
//! ```ignore
//! let config = FinderConfig::from_toml(include_str!("finder.toml"))?;
//! view! { <Finder config=config on_select=Callback::new(|path: String| log!("{path}")) /> }
//! ```

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::components::Finder;
pub use crate::components::renderers::{FileRenderer, RendererId, RendererRegistry};
pub use crate::config::{FinderConfig, Templates};
pub use crate::core::error::{ConfigError, FetchError, UploadError};
pub use crate::core::{FinderEvent, FinderEvents, SubscriptionId};
pub use crate::models::{FileDescriptor, ListingEntry};
