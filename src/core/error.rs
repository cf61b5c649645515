//! Error types for the finder.
//!
//! Each domain gets its own enum:
//!
//! - [`FetchError`] - listing requests (transport, status, decoding, timeout)
//! - [`UploadError`] - multipart uploads
//! - [`ConfigError`] - configuration parsing and validation
//! - [`StackError`] - panel stack updates that no longer apply

use thiserror::Error;

/// Network/fetch-related errors for listing requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Upload errors for the multipart POST to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    /// No upload endpoint configured
    #[error("uploads are not enabled")]
    Disabled,
    /// Endpoint URL could not be built
    #[error("invalid upload URL: {0}")]
    InvalidUrl(String),
    /// Failed to build the request or form body
    #[error("Failed to create upload request")]
    RequestCreationFailed,
    /// Transport failure or aborted request
    #[error("Network error during upload")]
    NetworkError,
    /// Server answered with a non-2xx status
    #[error("HTTP error: {0}")]
    HttpError(u16),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Neither `listEndpoint`, `endpoint` nor `endpoints.list` was given.
    #[error("missing list endpoint (set `listEndpoint`)")]
    MissingListEndpoint,
    /// Input was not valid JSON/TOML for the config shape.
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Panel stack updates that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// The panel was removed while its request was in flight.
    #[error("panel {0} is no longer on the stack")]
    StalePanel(u64),
    /// The panel is not a directory, so it has no rows or uploads.
    #[error("panel {0} is not a directory")]
    NotADirectory(u64),
}
