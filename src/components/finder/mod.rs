//! The finder widget.
//!
//! ## Layout
//!
//! ```text
//! finder
//! ├── main (horizontal scroll viewport)
//! │   └── panels (strip, width = sum of active panel widths)
//! │       └── panel × n
//! └── footer (select button, only when selectable)
//! ```

mod context;
mod listing;
mod panel;
mod upload;

use leptos::html;
use leptos::prelude::*;

use crate::components::renderers::RendererRegistry;
use crate::config::FinderConfig;
use crate::core::{FinderEvents, HttpBackend, Navigator, PanelStack};
use crate::utils::dom::element_width;

pub use context::{FinderContext, SignalHost, WebNavigator, panel_dom_id};
pub use listing::DirectoryListing;
pub use panel::PanelView;
pub use upload::UploadOverlay;

stylance::import_crate_style!(css, "src/components/finder/finder.module.css");

/// Finder-style panel browser.
///
/// Loads `initial_path` (or the root) once mounted, one panel per path level.
/// `registry` defaults to the built-in renderers and `events` to a private
/// hub; pass either to share it with the host page. `on_select` is a shortcut
/// for subscribing to `file.selected`.
#[component]
pub fn Finder(
    config: FinderConfig,
    #[prop(into, default = None)] initial_path: Option<String>,
    #[prop(optional)] registry: Option<RendererRegistry>,
    #[prop(optional)] events: Option<FinderEvents>,
    #[prop(optional)] on_select: Option<Callback<String>>,
) -> impl IntoView {
    let events = events.unwrap_or_default();
    if let Some(on_select) = on_select {
        events.on_file_selected(move |path| on_select.run(path.to_string()));
    }

    let selectable = config.selectable;
    let select_label = config.select_label.clone();

    let stack = RwSignal::new(PanelStack::default());
    let navigator = Navigator::new(
        HttpBackend::new(config.clone()),
        SignalHost::new(stack),
        events,
    );
    let ctx = FinderContext::new(
        navigator,
        registry.unwrap_or_else(RendererRegistry::with_builtins),
        config,
    );
    provide_context(ctx);

    let main_ref = NodeRef::<html::Main>::new();
    let geometry = Memo::new(move |_| stack.with(PanelStack::geometry));

    // Attach once the viewport exists; its width drives the scroll math.
    let attached = StoredValue::new(false);
    Effect::new(move |_| {
        let Some(main) = main_ref.get() else {
            return;
        };
        if attached.get_value() {
            return;
        }
        attached.set_value(true);
        ctx.attach(element_width(&main), initial_path.clone());
    });

    Effect::new(move |_| {
        let scroll_left = geometry.get().scroll_left;
        if let Some(main) = main_ref.get() {
            main.set_scroll_left(scroll_left.round() as i32);
        }
    });

    view! {
        <div class=css::finder>
            <main class=css::main node_ref=main_ref>
                <section
                    class=css::panels
                    style:width=move || format!("{}px", geometry.get().total_width)
                >
                    <For
                        each=move || stack.with(PanelStack::panel_ids)
                        key=|id| *id
                        children=move |id| view! { <PanelView id=id /> }
                    />
                </section>
            </main>
            {selectable.then(|| view! {
                <footer class=css::footer>
                    <div class=css::actions>
                        <button
                            class=css::selectButton
                            type="button"
                            on:click=move |ev| {
                                ev.prevent_default();
                                ctx.confirm_selection();
                            }
                        >
                            {select_label}
                        </button>
                    </div>
                </footer>
            })}
        </div>
    }
}
