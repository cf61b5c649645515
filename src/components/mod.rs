//! UI components built with Leptos.
//!
//! - [`finder`] - The panel browser widget
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`renderers`] - File panel renderers and their registry

pub mod finder;
pub mod icons;
pub mod renderers;

pub use finder::Finder;
