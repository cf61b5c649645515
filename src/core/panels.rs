//! Panel stack state.
//!
//! [`PanelStack`] is the headless model behind the widget: the panels on
//! screen (loading ones included, in view order), the *active* panels
//! (successfully loaded, root to leaf), their measured widths, and the
//! viewport geometry derived from them.
//!
//! Invariants kept by every method:
//! - `active.len() == widths.len()`
//! - every active id is also a rendered panel
//! - `current_path` is the path of the most recently activated panel

use std::fmt;

use crate::core::error::StackError;
use crate::models::{FileDescriptor, ListingEntry};

/// Identifier of a rendered panel, unique within one stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a loaded panel shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    Directory,
    File,
}

/// Content of a panel.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelContent {
    /// Request in flight (or failed; failures are only logged)
    Loading,
    /// Directory listing with the currently marked row
    Directory {
        entries: Vec<ListingEntry>,
        selected: Option<usize>,
    },
    /// Single file handed to the renderer registry
    File(FileDescriptor),
}

/// A file queued in an upload overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadItem {
    pub name: String,
    pub size: u64,
}

/// Upload overlay state of a directory panel.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadProgress {
    pub items: Vec<UploadItem>,
    /// Shared progress, 0 to 100
    pub percent: f64,
    /// Set when the upload failed; the overlay stays until dismissed
    pub failure: Option<String>,
}

impl UploadProgress {
    /// Total size of all queued files.
    pub fn total_size(&self) -> u64 {
        self.items.iter().map(|item| item.size).sum()
    }
}

/// One rendered panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub id: PanelId,
    /// Path this panel was requested for
    pub path: String,
    pub content: PanelContent,
    pub upload: Option<UploadProgress>,
}

impl Panel {
    pub fn is_loading(&self) -> bool {
        matches!(self.content, PanelContent::Loading)
    }

    /// Kind of a loaded panel, `None` while loading.
    pub fn kind(&self) -> Option<PanelKind> {
        match self.content {
            PanelContent::Loading => None,
            PanelContent::Directory { .. } => Some(PanelKind::Directory),
            PanelContent::File(_) => Some(PanelKind::File),
        }
    }
}

/// Width and scroll position of the panel strip.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollGeometry {
    /// Sum of all active panel widths, applied to the strip
    pub total_width: f64,
    /// Horizontal scroll that keeps the right edge of the newest panel visible
    pub scroll_left: f64,
}

/// The drill-down stack of panels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelStack {
    /// Rendered panels, in view order
    panels: Vec<Panel>,
    /// Loaded panels, root to leaf
    active: Vec<PanelId>,
    /// Rendered width of each active panel (parallel to `active`)
    widths: Vec<f64>,
    current_path: String,
    viewport_width: f64,
    next_id: u64,
}

impl PanelStack {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Drop every panel and record a fresh viewport width.
    ///
    /// Ids keep increasing so late responses for old panels stay stale.
    pub fn reset(&mut self, viewport_width: f64) {
        self.panels.clear();
        self.active.clear();
        self.widths.clear();
        self.current_path.clear();
        self.viewport_width = viewport_width;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.panels.iter().map(|p| p.id).collect()
    }

    pub fn active(&self) -> &[PanelId] {
        &self.active
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Position of a panel in the active stack.
    pub fn depth_of(&self, id: PanelId) -> Option<usize> {
        self.active.iter().position(|&a| a == id)
    }

    /// Current strip width and scroll position.
    pub fn geometry(&self) -> ScrollGeometry {
        let total_width: f64 = self.widths.iter().sum();
        ScrollGeometry {
            total_width,
            scroll_left: (total_width - self.viewport_width).max(0.0),
        }
    }

    fn panel_mut(&mut self, id: PanelId) -> Result<&mut Panel, StackError> {
        self.panels
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StackError::StalePanel(id.get()))
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Append a loading panel for `path`.
    pub fn begin_load(&mut self, path: &str) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.panels.push(Panel {
            id,
            path: path.to_string(),
            content: PanelContent::Loading,
            upload: None,
        });
        id
    }

    /// Fill a loading panel with its response and push it onto the active stack.
    ///
    /// The width slot starts at zero until [`record_width`](Self::record_width)
    /// stores the measured value.
    pub fn complete_load(
        &mut self,
        id: PanelId,
        descriptor: FileDescriptor,
    ) -> Result<PanelKind, StackError> {
        let panel = self.panel_mut(id)?;
        let kind = if descriptor.is_directory() {
            panel.content = PanelContent::Directory {
                entries: descriptor.files.unwrap_or_default(),
                selected: None,
            };
            PanelKind::Directory
        } else {
            panel.content = PanelContent::File(descriptor);
            PanelKind::File
        };
        let path = panel.path.clone();

        self.active.push(id);
        self.widths.push(0.0);
        self.current_path = path;
        Ok(kind)
    }

    /// Store the rendered width of an active panel.
    pub fn record_width(&mut self, id: PanelId, width: f64) -> Result<ScrollGeometry, StackError> {
        let depth = self
            .depth_of(id)
            .ok_or(StackError::StalePanel(id.get()))?;
        self.widths[depth] = width.max(0.0);
        Ok(self.geometry())
    }

    // -------------------------------------------------------------------------
    // Truncation
    // -------------------------------------------------------------------------

    /// Remove every panel after `id`, keeping `id` itself.
    ///
    /// Active panels are popped from the top until `id` is reached; rendered
    /// panels still loading behind it are dropped too. If `id` is not active
    /// the whole stack is cleared.
    pub fn truncate_after(&mut self, id: PanelId) {
        while let Some(&top) = self.active.last() {
            if top == id {
                break;
            }
            self.active.pop();
            self.panels.retain(|p| p.id != top);
        }
        self.widths.truncate(self.active.len());

        match self.panels.iter().position(|p| p.id == id) {
            Some(pos) if !self.active.is_empty() => self.panels.truncate(pos + 1),
            _ => self.panels.clear(),
        }
    }

    /// Remove `id` and every panel after it.
    pub fn remove_from(&mut self, id: PanelId) {
        match self.depth_of(id) {
            Some(depth) if depth > 0 => self.truncate_after(self.active[depth - 1]),
            Some(_) => {
                self.active.clear();
                self.widths.clear();
                self.panels.clear();
            }
            None => self.panels.retain(|p| p.id != id),
        }
    }

    // -------------------------------------------------------------------------
    // Row selection
    // -------------------------------------------------------------------------

    /// Handle a click on row `index` of directory panel `id`.
    ///
    /// Returns the path to load, or `None` when the click is ignored (row
    /// already selected, row without a target, or a panel that is gone).
    /// On success every panel after `id` has been removed.
    pub fn select_entry(&mut self, id: PanelId, index: usize) -> Option<String> {
        let panel = self.panel(id)?;
        let PanelContent::Directory { entries, selected } = &panel.content else {
            return None;
        };
        if *selected == Some(index) {
            return None;
        }
        let target = entries.get(index)?.target()?.to_string();

        self.truncate_after(id);
        if let Ok(Panel {
            content: PanelContent::Directory { selected, .. },
            ..
        }) = self.panel_mut(id)
        {
            *selected = Some(index);
        }
        Some(target)
    }

    /// Mark the first row of `id` whose path starts with `prefix`.
    pub fn mark_matching(&mut self, id: PanelId, prefix: &str) -> Option<usize> {
        let panel = self.panel_mut(id).ok()?;
        let PanelContent::Directory { entries, selected } = &mut panel.content else {
            return None;
        };
        let index = entries
            .iter()
            .position(|e| e.target().is_some_and(|t| t.starts_with(prefix)))?;
        *selected = Some(index);
        Some(index)
    }

    // -------------------------------------------------------------------------
    // Uploads
    // -------------------------------------------------------------------------

    /// Open the upload overlay on a directory panel; returns the target path.
    pub fn begin_upload(&mut self, id: PanelId, items: Vec<UploadItem>) -> Result<String, StackError> {
        let panel = self.panel_mut(id)?;
        if panel.kind() != Some(PanelKind::Directory) {
            return Err(StackError::NotADirectory(id.get()));
        }
        panel.upload = Some(UploadProgress {
            items,
            percent: 0.0,
            failure: None,
        });
        Ok(panel.path.clone())
    }

    pub fn set_upload_progress(&mut self, id: PanelId, percent: f64) {
        if let Ok(panel) = self.panel_mut(id)
            && let Some(upload) = panel.upload.as_mut()
        {
            upload.percent = percent.clamp(0.0, 100.0);
        }
    }

    pub fn fail_upload(&mut self, id: PanelId, message: String) {
        if let Ok(panel) = self.panel_mut(id)
            && let Some(upload) = panel.upload.as_mut()
        {
            upload.failure = Some(message);
        }
    }

    pub fn dismiss_upload(&mut self, id: PanelId) {
        if let Ok(panel) = self.panel_mut(id) {
            panel.upload = None;
        }
    }
}
