//! Panel stack navigation flows.
//!
//! [`Navigator`] drives a [`PanelStack`] through the user-facing operations:
//! attaching to a path, loading a level, opening a row, uploading into a
//! directory and confirming the selection. It is generic over two seams:
//!
//! - [`FinderBackend`] - where listings and uploads come from
//! - [`PanelHost`] - where the stack lives and how a loaded panel is
//!   rendered and measured
//!
//! All flows run on the UI thread; every `.await` is a network or render
//! suspension point after which the stack may have changed.

use std::future::Future;
use std::rc::Rc;

use leptos::logging::{error, warn};

use crate::core::backend::{FinderBackend, ProgressFn, UploadFile};
use crate::core::events::{FinderEvent, FinderEvents};
use crate::core::panels::{PanelId, PanelStack, UploadItem};
use crate::utils::format::path_prefixes;

/// Owner of the panel stack.
pub trait PanelHost: Clone + 'static {
    /// Apply `f` to the stack. Returns `None` once the host is gone.
    fn update<R>(&self, f: impl FnOnce(&mut PanelStack) -> R) -> Option<R>;

    /// Wait until a freshly loaded panel is rendered and record its width.
    fn settle(&self, id: PanelId) -> impl Future<Output = ()>;
}

/// Navigation flows over a backend and a panel host.
pub struct Navigator<B: FinderBackend, H: PanelHost> {
    backend: Rc<B>,
    host: H,
    events: FinderEvents,
}

impl<B: FinderBackend, H: PanelHost> Clone for Navigator<B, H> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            host: self.host.clone(),
            events: self.events.clone(),
        }
    }
}

impl<B: FinderBackend, H: PanelHost> Navigator<B, H> {
    pub fn new(backend: B, host: H, events: FinderEvents) -> Self {
        Self {
            backend: Rc::new(backend),
            host,
            events,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn events(&self) -> &FinderEvents {
        &self.events
    }

    pub fn uploads_enabled(&self) -> bool {
        self.backend.supports_upload()
    }

    /// Reset the stack and open `initial_path` (or the root).
    ///
    /// Every prefix of `initial_path` is loaded in order. After each level is
    /// loaded, the row leading to it is marked in the parent panel; the next
    /// level only starts once that is done. A failed level ends the walk.
    pub async fn attach(&self, viewport_width: f64, initial_path: Option<&str>) {
        if self.host.update(|s| s.reset(viewport_width)).is_none() {
            return;
        }

        let Some(initial) = initial_path.filter(|p| !p.trim().is_empty()) else {
            self.load_path("/").await;
            return;
        };

        let mut parent: Option<PanelId> = None;
        for prefix in path_prefixes(initial) {
            let Some(id) = self.load_path(&prefix).await else {
                warn!("Stopped opening {} at {}", initial, prefix);
                return;
            };
            if let Some(parent) = parent {
                self.host.update(|s| s.mark_matching(parent, &prefix));
            }
            parent = Some(id);
        }
    }

    /// Append a panel for `path` and fill it from the listing endpoint.
    ///
    /// Returns the panel id once it is active and measured. On failure the
    /// panel is left in its loading state and the error is logged.
    pub async fn load_path(&self, path: &str) -> Option<PanelId> {
        let id = self.host.update(|s| s.begin_load(path))?;

        let descriptor = match self.backend.list(path).await {
            Ok(descriptor) => descriptor,
            Err(e) => {
                error!("Failed to fetch directory listing for {}: {}", path, e);
                return None;
            }
        };

        if let Err(e) = self.host.update(|s| s.complete_load(id, descriptor))? {
            warn!("Discarding listing for {}: {}", path, e);
            return None;
        }

        self.host.settle(id).await;
        Some(id)
    }

    /// Open row `index` of directory panel `panel`.
    ///
    /// Deeper panels are removed before the row's target is loaded. Clicks on
    /// the selected row or on rows without a target do nothing.
    pub async fn open_entry(&self, panel: PanelId, index: usize) -> Option<PanelId> {
        let path = self.host.update(|s| s.select_entry(panel, index)).flatten()?;
        self.load_path(&path).await
    }

    /// Upload `files` into directory panel `panel`.
    ///
    /// On success the panel and everything after it are replaced by a fresh
    /// load of the directory, unless the panel was closed in the meantime.
    /// On failure the overlay switches to its error
    /// state and the panels are left untouched.
    pub async fn upload(&self, panel: PanelId, files: Vec<B::File>) {
        if files.is_empty() {
            return;
        }
        if !self.backend.supports_upload() {
            warn!("Ignoring dropped files: no upload endpoint configured");
            return;
        }

        let items: Vec<UploadItem> = files
            .iter()
            .map(|f| UploadItem {
                name: f.name(),
                size: f.size(),
            })
            .collect();
        let path = match self.host.update(|s| s.begin_upload(panel, items)) {
            Some(Ok(path)) => path,
            Some(Err(e)) => {
                warn!("Ignoring dropped files: {}", e);
                return;
            }
            None => return,
        };

        let host = self.host.clone();
        let on_progress: ProgressFn = Box::new(move |percent| {
            host.update(|s| s.set_upload_progress(panel, percent));
        });

        match self.backend.upload(&path, &files, on_progress).await {
            Ok(()) => {
                // The user may have navigated away while the upload ran.
                let still_open = self.host.update(|s| s.depth_of(panel)).flatten().is_some();
                if still_open {
                    self.host.update(|s| s.remove_from(panel));
                    self.load_path(&path).await;
                } else {
                    warn!("Not reloading {} after upload: panel {} was closed", path, panel);
                }
                self.events.emit(&FinderEvent::UploadFinished {
                    path,
                    files: files.len(),
                });
            }
            Err(e) => {
                error!("Failed to upload {} file(s) to {}: {}", files.len(), path, e);
                self.host.update(|s| s.fail_upload(panel, e.to_string()));
                self.events.emit(&FinderEvent::UploadFailed {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    /// Close a failed upload overlay.
    pub fn dismiss_upload(&self, panel: PanelId) {
        self.host.update(|s| s.dismiss_upload(panel));
    }

    /// Emit `file.selected` for the active path. Nothing is emitted before
    /// the first panel has loaded.
    pub fn confirm_selection(&self) -> Option<String> {
        let path = self
            .host
            .update(|s| s.current_path().to_string())
            .filter(|p| !p.is_empty())?;
        self.events.emit(&FinderEvent::FileSelected(path.clone()));
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;
    use crate::core::error::{FetchError, UploadError};
    use crate::core::panels::PanelContent;
    use crate::models::{FileDescriptor, ListingEntry};
    use crate::utils::format::format_size;

    const PANEL_WIDTH: f64 = 200.0;

    #[derive(Clone)]
    struct TestHost {
        stack: Rc<RefCell<PanelStack>>,
    }

    impl PanelHost for TestHost {
        fn update<R>(&self, f: impl FnOnce(&mut PanelStack) -> R) -> Option<R> {
            Some(f(&mut self.stack.borrow_mut()))
        }

        async fn settle(&self, id: PanelId) {
            tokio::task::yield_now().await;
            let _ = self.stack.borrow_mut().record_width(id, PANEL_WIDTH);
        }
    }

    struct TestFile(&'static str, u64);

    impl UploadFile for TestFile {
        fn name(&self) -> String {
            self.0.to_string()
        }

        fn size(&self) -> u64 {
            self.1
        }
    }

    /// In-memory backend that records each request together with the number
    /// of active panels at the moment it was issued.
    #[derive(Default)]
    struct TestBackend {
        stack: Rc<RefCell<PanelStack>>,
        responses: HashMap<String, Result<FileDescriptor, FetchError>>,
        calls: Rc<RefCell<Vec<(String, usize)>>>,
        /// Simulated user click (panel, row) performed while `path` is in flight
        interrupt: Rc<RefCell<Option<(String, PanelId, usize)>>>,
        /// Times `upload` yields before completing
        upload_yields: usize,
        upload_result: Option<Result<(), UploadError>>,
        progress_seen: Rc<Cell<f64>>,
    }

    impl FinderBackend for TestBackend {
        type File = TestFile;

        async fn list(&self, path: &str) -> Result<FileDescriptor, FetchError> {
            let active = self.stack.borrow().active().len();
            self.calls.borrow_mut().push((path.to_string(), active));
            tokio::task::yield_now().await;

            let interrupt = self.interrupt.borrow().clone();
            if let Some((target, panel, row)) = interrupt
                && target == path
            {
                self.stack.borrow_mut().select_entry(panel, row);
            }

            self.responses
                .get(path)
                .cloned()
                .unwrap_or(Err(FetchError::HttpError(404)))
        }

        async fn upload(
            &self,
            _path: &str,
            _files: &[TestFile],
            on_progress: ProgressFn,
        ) -> Result<(), UploadError> {
            on_progress(50.0);
            let root = self.stack.borrow().active()[0];
            let percent = self
                .stack
                .borrow()
                .panel(root)
                .and_then(|p| p.upload.as_ref().map(|u| u.percent))
                .unwrap_or_default();
            self.progress_seen.set(percent);
            for _ in 0..self.upload_yields {
                tokio::task::yield_now().await;
            }
            self.upload_result.clone().unwrap_or(Err(UploadError::Disabled))
        }

        fn supports_upload(&self) -> bool {
            self.upload_result.is_some()
        }
    }

    fn dir(children: &[&str]) -> Result<FileDescriptor, FetchError> {
        Ok(FileDescriptor {
            kind: "directory".into(),
            name: String::new(),
            relative_path: String::new(),
            size: None,
            files: Some(
                children
                    .iter()
                    .map(|p| ListingEntry {
                        name: p.rsplit('/').next().unwrap_or_default().to_string(),
                        relative_path: p.to_string(),
                        kind: None,
                    })
                    .collect(),
            ),
            extra: Default::default(),
        })
    }

    fn setup(
        responses: Vec<(&str, Result<FileDescriptor, FetchError>)>,
    ) -> (TestBackend, TestHost) {
        let stack = Rc::new(RefCell::new(PanelStack::new(500.0)));
        let backend = TestBackend {
            stack: Rc::clone(&stack),
            responses: responses
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
            ..Default::default()
        };
        (backend, TestHost { stack })
    }

    fn selected_row(host: &TestHost, id: PanelId) -> Option<usize> {
        match &host.stack.borrow().panel(id)?.content {
            PanelContent::Directory { selected, .. } => *selected,
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_attach_loads_root() {
        let (backend, host) = setup(vec![("/", dir(&["/a"]))]);
        let calls = Rc::clone(&backend.calls);
        let nav = Navigator::new(backend, host.clone(), FinderEvents::new());

        nav.attach(500.0, None).await;

        assert_eq!(*calls.borrow(), vec![("/".to_string(), 0)]);
        let stack = host.stack.borrow();
        assert_eq!(stack.active().len(), 1);
        assert_eq!(stack.widths(), &[PANEL_WIDTH]);
        assert_eq!(stack.current_path(), "/");
    }

    #[tokio::test]
    async fn test_attach_drills_down_in_order() {
        let (backend, host) = setup(vec![
            ("/", dir(&["/other", "/a"])),
            ("/a", dir(&["/a/b"])),
            ("/a/b", dir(&["/a/b/c"])),
            ("/a/b/c", dir(&[])),
        ]);
        let calls = Rc::clone(&backend.calls);
        let nav = Navigator::new(backend, host.clone(), FinderEvents::new());

        nav.attach(300.0, Some("/a/b/c")).await;

        // Each level is requested only after the previous one became active.
        assert_eq!(
            *calls.borrow(),
            vec![
                ("/".to_string(), 0),
                ("/a".to_string(), 1),
                ("/a/b".to_string(), 2),
                ("/a/b/c".to_string(), 3),
            ]
        );

        let active = host.stack.borrow().active().to_vec();
        assert_eq!(active.len(), 4);
        assert_eq!(selected_row(&host, active[0]), Some(1));
        assert_eq!(selected_row(&host, active[1]), Some(0));
        assert_eq!(selected_row(&host, active[2]), Some(0));
        assert_eq!(selected_row(&host, active[3]), None);

        let geometry = host.stack.borrow().geometry();
        assert_eq!(geometry.total_width, 4.0 * PANEL_WIDTH);
        assert_eq!(geometry.scroll_left, 4.0 * PANEL_WIDTH - 300.0);
    }

    #[tokio::test]
    async fn test_attach_stops_at_failed_level() {
        let (backend, host) = setup(vec![("/", dir(&["/a"]))]);
        let calls = Rc::clone(&backend.calls);
        let nav = Navigator::new(backend, host.clone(), FinderEvents::new());

        nav.attach(500.0, Some("/a/b")).await;

        assert_eq!(calls.borrow().len(), 2);
        let stack = host.stack.borrow();
        assert_eq!(stack.active().len(), 1);
        // The failed panel stays on screen in its loading state.
        assert_eq!(stack.panels().len(), 2);
        assert!(stack.panels()[1].is_loading());
        assert_eq!(stack.current_path(), "/");
    }

    #[tokio::test]
    async fn test_open_image_entry() {
        let file = FileDescriptor {
            kind: "file".into(),
            name: "x.png".into(),
            relative_path: "/x.png".into(),
            size: Some(2048),
            files: None,
            extra: Default::default(),
        };
        let (backend, host) = setup(vec![("/", dir(&["/x.png"])), ("/x.png", Ok(file))]);
        let calls = Rc::clone(&backend.calls);
        let nav = Navigator::new(backend, host.clone(), FinderEvents::new());
        nav.attach(500.0, None).await;

        let root = host.stack.borrow().active()[0];
        let leaf = nav.open_entry(root, 0).await.unwrap();

        assert_eq!(calls.borrow().last().unwrap().0, "/x.png");
        let stack = host.stack.borrow();
        assert_eq!(stack.current_path(), "/x.png");
        let PanelContent::File(desc) = &stack.panel(leaf).unwrap().content else {
            panic!("expected a file panel");
        };
        assert_eq!(format_size(desc.size.unwrap()), "2 KB");
    }

    #[tokio::test]
    async fn test_open_entry_on_selected_row_is_noop() {
        let (backend, host) = setup(vec![("/", dir(&["/a"])), ("/a", dir(&[]))]);
        let calls = Rc::clone(&backend.calls);
        let nav = Navigator::new(backend, host.clone(), FinderEvents::new());
        nav.attach(500.0, None).await;
        let root = host.stack.borrow().active()[0];

        assert!(nav.open_entry(root, 0).await.is_some());
        assert!(nav.open_entry(root, 0).await.is_none());
        assert_eq!(calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (backend, host) = setup(vec![("/", dir(&["/a", "/b"])), ("/a", dir(&[]))]);
        let interrupt = Rc::clone(&backend.interrupt);
        let nav = Navigator::new(backend, host.clone(), FinderEvents::new());
        nav.attach(500.0, None).await;
        let root = host.stack.borrow().active()[0];

        // The user clicks "/b" while "/a" is loading.
        *interrupt.borrow_mut() = Some(("/a".to_string(), root, 1));

        assert_eq!(nav.open_entry(root, 0).await, None);
        let stack = host.stack.borrow();
        assert_eq!(stack.active(), &[root]);
        assert_eq!(stack.panels().len(), 1);
        assert_eq!(stack.current_path(), "/");
    }

    #[tokio::test]
    async fn test_upload_success_reloads_directory() {
        let (mut backend, host) = setup(vec![("/", dir(&["/a"])), ("/a", dir(&[]))]);
        backend.upload_result = Some(Ok(()));
        let progress = Rc::clone(&backend.progress_seen);
        let calls = Rc::clone(&backend.calls);
        let events = FinderEvents::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        events.subscribe(move |e| s.borrow_mut().push(e.clone()));

        let nav = Navigator::new(backend, host.clone(), events);
        nav.attach(500.0, None).await;
        let root = host.stack.borrow().active()[0];
        nav.open_entry(root, 0).await;

        nav.upload(root, vec![TestFile("a.txt", 3), TestFile("b.txt", 4)])
            .await;

        assert_eq!(progress.get(), 50.0);
        assert_eq!(calls.borrow().last().unwrap().0, "/");
        let stack = host.stack.borrow();
        assert_eq!(stack.active().len(), 1);
        assert_ne!(stack.active()[0], root);
        assert!(stack.panel(stack.active()[0]).unwrap().upload.is_none());
        assert_eq!(
            *seen.borrow(),
            vec![FinderEvent::UploadFinished {
                path: "/".into(),
                files: 2
            }]
        );
    }

    fn panel_paths(host: &TestHost) -> Vec<String> {
        host.stack
            .borrow()
            .panels()
            .iter()
            .map(|p| p.path.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_upload_into_closed_panel_skips_reload() {
        let (mut backend, host) = setup(vec![
            ("/", dir(&["/a", "/b"])),
            ("/a", dir(&[])),
            ("/b", dir(&[])),
        ]);
        backend.upload_result = Some(Ok(()));
        backend.upload_yields = 5;
        let calls = Rc::clone(&backend.calls);
        let events = FinderEvents::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        events.subscribe(move |e| s.borrow_mut().push(e.name()));

        let nav = Navigator::new(backend, host.clone(), events);
        nav.attach(500.0, None).await;
        let root = host.stack.borrow().active()[0];
        let a = nav.open_entry(root, 0).await.unwrap();

        // Open "/b" while the upload into "/a" is still running.
        let (_, b) = tokio::join!(
            nav.upload(a, vec![TestFile("a.txt", 3)]),
            nav.open_entry(root, 1),
        );

        assert!(b.is_some());
        assert_eq!(calls.borrow().last().unwrap().0, "/b");
        assert_eq!(panel_paths(&host), vec!["/", "/b"]);
        assert_eq!(host.stack.borrow().current_path(), "/b");
        assert_eq!(host.stack.borrow().active().len(), 2);
        assert_eq!(*seen.borrow(), vec!["upload.finished"]);
    }

    #[tokio::test]
    async fn test_overlapping_uploads_reload_once() {
        let (mut backend, host) = setup(vec![("/", dir(&["/a"])), ("/a", dir(&[]))]);
        backend.upload_result = Some(Ok(()));
        backend.upload_yields = 2;
        let calls = Rc::clone(&backend.calls);
        let nav = Navigator::new(backend, host.clone(), FinderEvents::new());
        nav.attach(500.0, None).await;
        let root = host.stack.borrow().active()[0];
        let a = nav.open_entry(root, 0).await.unwrap();

        tokio::join!(
            nav.upload(a, vec![TestFile("a.txt", 3)]),
            nav.upload(a, vec![TestFile("b.txt", 4)]),
        );

        let reloads = calls.borrow().iter().filter(|(p, _)| p == "/a").count();
        assert_eq!(reloads, 2);
        assert_eq!(panel_paths(&host), vec!["/", "/a"]);
        let stack = host.stack.borrow();
        assert_eq!(stack.active().len(), 2);
        assert_ne!(stack.active()[1], a);
    }

    #[tokio::test]
    async fn test_upload_failure_is_reported() {
        let (mut backend, host) = setup(vec![("/", dir(&["/a"]))]);
        backend.upload_result = Some(Err(UploadError::HttpError(500)));
        let calls = Rc::clone(&backend.calls);
        let events = FinderEvents::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        events.subscribe(move |e| s.borrow_mut().push(e.name()));

        let nav = Navigator::new(backend, host.clone(), events);
        nav.attach(500.0, None).await;
        let root = host.stack.borrow().active()[0];

        nav.upload(root, vec![TestFile("a.txt", 3)]).await;

        assert_eq!(calls.borrow().len(), 1);
        {
            let stack = host.stack.borrow();
            assert_eq!(stack.active(), &[root]);
            let upload = stack.panel(root).unwrap().upload.clone().unwrap();
            assert_eq!(upload.failure.as_deref(), Some("HTTP error: 500"));
        }
        assert_eq!(*seen.borrow(), vec!["upload.failed"]);

        nav.dismiss_upload(root);
        assert!(host.stack.borrow().panel(root).unwrap().upload.is_none());
    }

    #[tokio::test]
    async fn test_upload_disabled_is_ignored() {
        let (backend, host) = setup(vec![("/", dir(&[]))]);
        let nav = Navigator::new(backend, host.clone(), FinderEvents::new());
        nav.attach(500.0, None).await;
        let root = host.stack.borrow().active()[0];

        nav.upload(root, vec![TestFile("a.txt", 3)]).await;

        assert!(host.stack.borrow().panel(root).unwrap().upload.is_none());
    }

    #[tokio::test]
    async fn test_confirm_selection_emits_current_path() {
        let (backend, host) = setup(vec![("/", dir(&["/a"])), ("/a", dir(&[]))]);
        let events = FinderEvents::new();
        let selected = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&selected);
        events.on_file_selected(move |p| s.borrow_mut().push(p.to_string()));
        let nav = Navigator::new(backend, host.clone(), events);

        assert_eq!(nav.confirm_selection(), None);

        nav.attach(500.0, None).await;
        let root = host.stack.borrow().active()[0];
        nav.open_entry(root, 0).await;

        assert_eq!(nav.confirm_selection().as_deref(), Some("/a"));
        assert_eq!(*selected.borrow(), vec!["/a".to_string()]);
    }
}
