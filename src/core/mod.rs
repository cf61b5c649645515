//! Headless logic of the finder.
//!
//! This module provides:
//! - [`PanelStack`] panel/width bookkeeping
//! - [`Navigator`] navigation flows over a [`FinderBackend`] and a [`PanelHost`]
//! - [`FinderEvents`] output event subscription

pub mod backend;
pub mod error;
pub mod events;
pub mod navigator;
pub mod panels;

pub use backend::{FinderBackend, HttpBackend, ProgressFn, UploadFile};
pub use events::{FinderEvent, FinderEvents, SubscriptionId};
pub use navigator::{Navigator, PanelHost};
pub use panels::{
    Panel, PanelContent, PanelId, PanelKind, PanelStack, ScrollGeometry, UploadItem,
    UploadProgress,
};
