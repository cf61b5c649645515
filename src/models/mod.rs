//! Data models for the finder.
//!
//! - [`FileDescriptor`], [`ListingEntry`] - Listing endpoint payloads
//! - [`FileType`] - Coarse file kind for row icons

mod listing;

pub use listing::{DIRECTORY_TYPE, FileDescriptor, FileType, ListingEntry};
