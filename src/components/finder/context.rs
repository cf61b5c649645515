//! Reactive finder context shared by the panel components.

use std::sync::atomic::{AtomicU32, Ordering};

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::renderers::RendererRegistry;
use crate::config::FinderConfig;
use crate::core::{HttpBackend, Navigator, PanelHost, PanelId, PanelStack};
use crate::utils::dom::{element_by_id, element_width};

/// Navigator wired to the HTTP endpoints and a signal-backed stack.
pub type WebNavigator = Navigator<HttpBackend, SignalHost>;

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(0);

/// DOM id of a panel element, unique across widget instances.
pub fn panel_dom_id(instance: u32, id: PanelId) -> String {
    format!("finder-{}-panel-{}", instance, id)
}

/// [`PanelHost`] keeping the stack in a signal so the view follows it.
#[derive(Clone, Copy)]
pub struct SignalHost {
    stack: RwSignal<PanelStack>,
    instance: u32,
}

impl SignalHost {
    /// Create a host with a fresh instance number.
    pub fn new(stack: RwSignal<PanelStack>) -> Self {
        Self {
            stack,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn instance(&self) -> u32 {
        self.instance
    }
}

impl PanelHost for SignalHost {
    fn update<R>(&self, f: impl FnOnce(&mut PanelStack) -> R) -> Option<R> {
        self.stack.try_update(f)
    }

    async fn settle(&self, id: PanelId) {
        // Yield a macrotask so the reactive renderer has flushed the new panel.
        TimeoutFuture::new(0).await;

        let width = element_by_id(&panel_dom_id(self.instance, id))
            .map(|element| element_width(&element))
            .unwrap_or_default();
        self.stack.try_update(|s| s.record_width(id, width));
    }
}

/// Everything the panel components need, cheap to copy.
#[derive(Clone, Copy)]
pub struct FinderContext {
    pub stack: RwSignal<PanelStack>,
    pub navigator: StoredValue<WebNavigator, LocalStorage>,
    pub registry: StoredValue<RendererRegistry, LocalStorage>,
    pub config: StoredValue<FinderConfig>,
    pub instance: u32,
}

impl FinderContext {
    pub fn new(navigator: WebNavigator, registry: RendererRegistry, config: FinderConfig) -> Self {
        let host = *navigator.host();
        Self {
            stack: host.stack,
            instance: host.instance(),
            navigator: StoredValue::new_local(navigator),
            registry: StoredValue::new_local(registry),
            config: StoredValue::new(config),
        }
    }

    pub fn panel_dom_id(&self, id: PanelId) -> String {
        panel_dom_id(self.instance, id)
    }

    pub fn uploads_enabled(&self) -> bool {
        self.config.with_value(FinderConfig::uploads_enabled)
    }

    pub fn attach(&self, viewport_width: f64, initial_path: Option<String>) {
        let navigator = self.navigator.get_value();
        spawn_local(async move {
            navigator.attach(viewport_width, initial_path.as_deref()).await;
        });
    }

    pub fn open_entry(&self, panel: PanelId, index: usize) {
        let navigator = self.navigator.get_value();
        spawn_local(async move {
            navigator.open_entry(panel, index).await;
        });
    }

    pub fn upload(&self, panel: PanelId, files: Vec<web_sys::File>) {
        let navigator = self.navigator.get_value();
        spawn_local(async move {
            navigator.upload(panel, files).await;
        });
    }

    pub fn dismiss_upload(&self, panel: PanelId) {
        self.navigator.with_value(|n| n.dismiss_upload(panel));
    }

    pub fn confirm_selection(&self) {
        self.navigator.with_value(|n| n.confirm_selection());
    }
}
