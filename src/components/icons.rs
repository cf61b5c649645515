//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;
use crate::models::FileType;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronRight as ChevronRight, LuFile as File, LuFileText as FileText,
        LuFolder as Folder, LuImage as FileImage, LuInfo as Alert, LuUpload as Upload,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsChevronRight as ChevronRight, BsExclamationTriangle as Alert,
        BsFileEarmark as File, BsFileEarmarkImage as FileImage, BsFileEarmarkText as FileText,
        BsFolderFill as Folder, BsUpload as Upload, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(FOLDER, Folder);
themed_icon!(FILE, File);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(UPLOAD, Upload);
themed_icon!(ALERT, Alert);
themed_icon!(CLOSE, Close);

/// Icon for a listing row.
pub fn for_file_type(file_type: FileType) -> Icon {
    match file_type {
        FileType::Directory => FOLDER,
        FileType::Image => FILE_IMAGE,
        FileType::Text => FILE_TEXT,
        FileType::Unknown => FILE,
    }
}
