use serde::{Deserialize, Serialize};

// =============================================================================
// Listing Types
// =============================================================================

/// `type` value the listing endpoint uses for directories.
pub const DIRECTORY_TYPE: &str = "directory";

/// One item of a directory response.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ListingEntry {
    /// Display name
    pub name: String,
    /// Path to request when the row is opened (empty = not navigable)
    #[serde(default)]
    pub relative_path: String,
    /// Optional type hint, only used to pick the row icon
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ListingEntry {
    /// Target path for this row, if it has one.
    pub fn target(&self) -> Option<&str> {
        let path = self.relative_path.trim();
        (!path.is_empty()).then_some(path)
    }

    /// Whether the server marked this entry as a directory.
    pub fn is_directory(&self) -> bool {
        self.kind.as_deref() == Some(DIRECTORY_TYPE)
    }
}

/// Listing endpoint response for a directory or a single file.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FileDescriptor {
    /// `"directory"` or anything else for a file
    #[serde(rename = "type")]
    pub kind: String,
    /// File or directory name
    #[serde(default)]
    pub name: String,
    /// Path relative to the served root
    #[serde(default)]
    pub relative_path: String,
    /// Size in bytes (files only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Children (directories only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ListingEntry>>,
    /// Any other fields the server sent, kept for custom renderers
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileDescriptor {
    /// Whether this response describes a directory.
    pub fn is_directory(&self) -> bool {
        self.kind == DIRECTORY_TYPE
    }
}

/// Coarse file kind derived from a name, used for row icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Directory,
    Image,
    Text,
    Unknown,
}

impl FileType {
    /// Detect file type from a listing entry.
    pub fn from_entry(entry: &ListingEntry) -> Self {
        if entry.is_directory() {
            Self::Directory
        } else {
            Self::from_name(&entry.name)
        }
    }

    /// Detect file type from the name's extension.
    pub fn from_name(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Unknown;
        };
        match ext.to_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "bmp" | "ico" => Self::Image,
            "md" | "txt" | "json" | "toml" | "csv" | "log" => Self::Text,
            _ => Self::Unknown,
        }
    }
}
