//! Network seam of the navigator.
//!
//! [`FinderBackend`] is what the navigator talks to for listings and uploads.
//! [`HttpBackend`] is the browser implementation against the configured
//! endpoints; tests plug in an in-memory backend.

use std::future::Future;

use crate::config::FinderConfig;
use crate::core::error::{FetchError, UploadError};
use crate::models::FileDescriptor;
use crate::utils::fetch::{fetch_listing, upload_files};

/// A file that can be uploaded.
pub trait UploadFile {
    fn name(&self) -> String;
    fn size(&self) -> u64;
}

impl UploadFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> u64 {
        let blob: &web_sys::Blob = self;
        blob.size().max(0.0) as u64
    }
}

/// Progress callback for uploads, called with a percentage (0 to 100).
pub type ProgressFn = Box<dyn Fn(f64)>;

/// Listing and upload operations used by the navigator.
pub trait FinderBackend: 'static {
    type File: UploadFile;

    /// Fetch the descriptor for `path`.
    fn list(&self, path: &str) -> impl Future<Output = Result<FileDescriptor, FetchError>>;

    /// Upload `files` into directory `path` in a single request.
    fn upload(
        &self,
        path: &str,
        files: &[Self::File],
        on_progress: ProgressFn,
    ) -> impl Future<Output = Result<(), UploadError>>;

    /// Whether [`upload`](Self::upload) can succeed at all.
    fn supports_upload(&self) -> bool;
}

/// Backend for the HTTP listing/upload endpoints.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    config: FinderConfig,
}

impl HttpBackend {
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }
}

impl FinderBackend for HttpBackend {
    type File = web_sys::File;

    async fn list(&self, path: &str) -> Result<FileDescriptor, FetchError> {
        fetch_listing(&self.config.list_endpoint, path, self.config.fetch_timeout_ms).await
    }

    async fn upload(
        &self,
        path: &str,
        files: &[web_sys::File],
        on_progress: ProgressFn,
    ) -> Result<(), UploadError> {
        let endpoint = self
            .config
            .upload_endpoint
            .as_deref()
            .ok_or(UploadError::Disabled)?;
        upload_files(endpoint, path, files, on_progress).await
    }

    fn supports_upload(&self) -> bool {
        self.config.uploads_enabled()
    }
}
