//! Event subscription for finder output signals.
//!
//! The navigator owns a [`FinderEvents`] handle and emits through it; embedders
//! subscribe on a clone of the same handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Events emitted by the finder.
#[derive(Clone, Debug, PartialEq)]
pub enum FinderEvent {
    /// The user confirmed the active path with the Select button.
    FileSelected(String),
    /// An upload completed and the directory was reloaded.
    UploadFinished { path: String, files: usize },
    /// An upload failed; the directory was left as it was.
    UploadFailed { path: String, error: String },
}

impl FinderEvent {
    /// Dotted event name, e.g. `file.selected`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FileSelected(_) => "file.selected",
            Self::UploadFinished { .. } => "upload.finished",
            Self::UploadFailed { .. } => "upload.failed",
        }
    }
}

/// Handle returned by [`FinderEvents::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&FinderEvent)>;

/// Shared list of event listeners. Clones refer to the same list.
#[derive(Clone, Default)]
pub struct FinderEvents {
    listeners: Rc<RefCell<Vec<(SubscriptionId, Listener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl FinderEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event.
    pub fn subscribe(&self, listener: impl Fn(&FinderEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Register a listener for `file.selected` only.
    pub fn on_file_selected(&self, listener: impl Fn(&str) + 'static) -> SubscriptionId {
        self.subscribe(move |event| {
            if let FinderEvent::FileSelected(path) = event {
                listener(path);
            }
        })
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    /// Deliver an event to every listener in subscription order.
    pub fn emit(&self, event: &FinderEvent) {
        // Snapshot so listeners may (un)subscribe while being called.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
