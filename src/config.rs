//! Finder configuration.
//!
//! Centralizes the constants used throughout the widget and the
//! [`FinderConfig`] surface supplied at construction. Configuration is
//! accepted as JSON or TOML, in either the nested `endpoints` shape or the
//! flat shape:
//!
//! ```toml
//! listEndpoint = "/api/list"
//! uploadEndpoint = "/api/upload"
//! assetBasePath = "/files"
//! ```

use serde::Deserialize;

use crate::core::error::ConfigError;

// =============================================================================
// Network Configuration
// =============================================================================

/// Default listing request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u32 = 10_000;

/// Query parameter carrying the target path on both endpoints.
pub const PATH_QUERY_PARAM: &str = "path";

/// Multipart field name used for each uploaded file.
pub const UPLOAD_FIELD: &str = "file";

// =============================================================================
// Layout Configuration
// =============================================================================

/// Margin (px) kept free around a previewed image on each axis.
pub const IMAGE_MARGIN_PX: f64 = 50.0;

/// Placeholder shown in the image dimensions row until the image loads.
pub const DIMENSIONS_PLACEHOLDER: &str = "Fetching...";

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the widget.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

// =============================================================================
// FinderConfig
// =============================================================================

/// UI strings with `{{ key }}` placeholders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Templates {
    /// Image dimensions row; keys: `width`, `height`
    pub dimensions: String,
    /// Upload overlay header; keys: `count`, `size`
    pub upload_summary: String,
    /// Upload failure message; keys: `error`
    pub upload_failed: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            dimensions: "{{ width }} x {{ height }}".to_string(),
            upload_summary: "Uploading {{ count }} file(s), {{ size }}".to_string(),
            upload_failed: "Upload failed: {{ error }}".to_string(),
        }
    }
}

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct FinderConfig {
    /// Listing endpoint (GET, `?path=`)
    pub list_endpoint: String,
    /// Upload endpoint (multipart POST, `?path=`); `None` disables uploads
    pub upload_endpoint: Option<String>,
    /// Prefix joined with a file's `relative_path` to fetch raw assets
    pub asset_base_path: String,
    /// Whether the Select button is shown
    pub selectable: bool,
    /// Label of the Select button
    pub select_label: String,
    /// Listing request timeout
    pub fetch_timeout_ms: u32,
    /// Configurable UI strings
    pub templates: Templates,
}

impl FinderConfig {
    /// Minimal configuration with only a listing endpoint.
    pub fn new(list_endpoint: impl Into<String>) -> Self {
        Self {
            list_endpoint: list_endpoint.into(),
            upload_endpoint: None,
            asset_base_path: String::new(),
            selectable: true,
            select_label: "Select".to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            templates: Templates::default(),
        }
    }

    /// Parse a JSON configuration object.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        raw.try_into()
    }

    /// Parse a TOML configuration document.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        raw.try_into()
    }

    /// Whether drag-and-drop uploads are enabled.
    pub fn uploads_enabled(&self) -> bool {
        self.upload_endpoint.is_some()
    }

    /// URL of the raw asset for a file's relative path.
    pub fn asset_url(&self, relative_path: &str) -> String {
        format!("{}{}", self.asset_base_path, relative_path)
    }
}

/// Nested endpoint table (`endpoints.list` / `endpoints.upload`).
#[derive(Debug, Default, Deserialize)]
struct RawEndpoints {
    list: Option<String>,
    upload: Option<String>,
}

/// Wire shape accepting every known spelling of the options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(alias = "listEndpoint", alias = "endpoint")]
    list_endpoint: Option<String>,
    #[serde(alias = "uploadEndpoint")]
    upload_endpoint: Option<String>,
    endpoints: Option<RawEndpoints>,
    #[serde(alias = "assetBasePath", alias = "path")]
    asset_base_path: Option<String>,
    selectable: Option<bool>,
    #[serde(alias = "selectLabel")]
    select_label: Option<String>,
    #[serde(alias = "fetchTimeoutMs")]
    fetch_timeout_ms: Option<u32>,
    templates: Option<Templates>,
}

impl TryFrom<RawConfig> for FinderConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let endpoints = raw.endpoints.unwrap_or_default();
        let list_endpoint = raw
            .list_endpoint
            .or(endpoints.list)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingListEndpoint)?;

        let mut config = Self::new(list_endpoint);
        config.upload_endpoint = raw
            .upload_endpoint
            .or(endpoints.upload)
            .filter(|url| !url.trim().is_empty());
        if let Some(base) = raw.asset_base_path {
            config.asset_base_path = base;
        }
        if let Some(selectable) = raw.selectable {
            config.selectable = selectable;
        }
        if let Some(label) = raw.select_label {
            config.select_label = label;
        }
        if let Some(timeout) = raw.fetch_timeout_ms {
            config.fetch_timeout_ms = timeout;
        }
        if let Some(templates) = raw.templates {
            config.templates = templates;
        }
        Ok(config)
    }
}
