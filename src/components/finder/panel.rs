//! A single panel of the strip.

use leptos::ev::DragEvent;
use leptos::prelude::*;

use super::{DirectoryListing, FinderContext, UploadOverlay};
use crate::core::{PanelContent, PanelId};
use crate::models::{FileDescriptor, ListingEntry};

stylance::import_crate_style!(css, "src/components/finder/panel.module.css");

/// Panel body, split out so selection and upload changes don't rebuild it.
#[derive(Clone, Debug, PartialEq)]
enum Body {
    Loading,
    Directory(Vec<ListingEntry>),
    File(FileDescriptor),
}

/// Files carried by a drop event.
fn dropped_files(ev: &DragEvent) -> Vec<web_sys::File> {
    let Some(list) = ev.data_transfer().and_then(|transfer| transfer.files()) else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[component]
pub fn PanelView(id: PanelId) -> impl IntoView {
    let ctx = use_context::<FinderContext>().expect("FinderContext must be provided");
    let uploads_enabled = ctx.uploads_enabled();

    let body = Memo::new(move |_| {
        ctx.stack.with(|s| match s.panel(id).map(|p| &p.content) {
            None | Some(PanelContent::Loading) => Body::Loading,
            Some(PanelContent::Directory { entries, .. }) => Body::Directory(entries.clone()),
            Some(PanelContent::File(file)) => Body::File(file.clone()),
        })
    });
    let selected = Memo::new(move |_| {
        ctx.stack.with(|s| match s.panel(id).map(|p| &p.content) {
            Some(PanelContent::Directory { selected, .. }) => *selected,
            _ => None,
        })
    });
    let is_directory = move || matches!(body.get(), Body::Directory(_));
    let drag_over = RwSignal::new(false);

    let panel_class = move || {
        let state = match body.get() {
            Body::Loading => css::isLoading,
            Body::Directory(_) => css::directory,
            Body::File(_) => css::file,
        };
        if drag_over.get() {
            format!("{} {} {}", css::panel, state, css::dragOver)
        } else {
            format!("{} {}", css::panel, state)
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if uploads_enabled && is_directory() {
            drag_over.set(true);
        }
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        if !uploads_enabled || !matches!(body.get_untracked(), Body::Directory(_)) {
            return;
        }
        let files = dropped_files(&ev);
        if !files.is_empty() {
            ctx.upload(id, files);
        }
    };

    view! {
        <div
            id=ctx.panel_dom_id(id)
            class=panel_class
            on:dragover=on_dragover
            on:dragend=move |ev: DragEvent| ev.prevent_default()
            on:dragleave=move |_| drag_over.set(false)
            on:drop=on_drop
        >
            {move || match body.get() {
                Body::Loading => {
                    view! { <div class=css::spinner aria-busy="true">"Loading..."</div> }
                        .into_any()
                }
                Body::Directory(entries) => {
                    view! { <DirectoryListing panel=id entries=entries selected=selected.into() /> }
                        .into_any()
                }
                Body::File(file) => {
                    ctx.registry.with_value(|registry| {
                        ctx.config.with_value(|config| registry.render_file(&file, config))
                    })
                }
            }}
            <UploadOverlay panel=id />
        </div>
    }
}
