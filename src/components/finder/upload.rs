//! Upload progress overlay of a directory panel.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos_icons::Icon;

use super::FinderContext;
use crate::components::icons as ic;
use crate::core::{PanelId, UploadItem};
use crate::utils::{format_size, substitute};

stylance::import_crate_style!(css, "src/components/finder/upload.module.css");

/// Summary line for the queued files.
fn summary(template: &str, items: &[UploadItem]) -> String {
    let total: u64 = items.iter().map(|item| item.size).sum();
    let data = HashMap::from([
        ("count", items.len().to_string()),
        ("size", format_size(total)),
    ]);
    substitute(template, &data)
}

/// Overlay shown while files dropped on `panel` are uploading.
///
/// Progress is shared by all files of the batch. A failed batch keeps the
/// overlay up with the error until dismissed.
#[component]
pub fn UploadOverlay(panel: PanelId) -> impl IntoView {
    let ctx = use_context::<FinderContext>().expect("FinderContext must be provided");

    let upload = Memo::new(move |_| {
        ctx.stack
            .with(|s| s.panel(panel).and_then(|p| p.upload.clone()))
    });
    let items = Memo::new(move |_| {
        upload.with(|u| u.as_ref().map(|u| u.items.clone()).unwrap_or_default())
    });
    let percent = Memo::new(move |_| upload.with(|u| u.as_ref().map_or(0.0, |u| u.percent)));
    let failure = Memo::new(move |_| upload.with(|u| u.as_ref().and_then(|u| u.failure.clone())));

    let overlay_class = move || {
        if failure.with(Option::is_some) {
            format!("{} {}", css::overlay, css::failed)
        } else {
            css::overlay.to_string()
        }
    };

    view! {
        <Show when=move || upload.with(Option::is_some)>
            <div class=overlay_class>
                <div class=css::card>
                    <p class=css::summary>
                        <span class=css::summaryIcon>
                            <Icon icon=ic::UPLOAD />
                        </span>
                        {move || {
                            ctx.config
                                .with_value(|c| items.with(|items| summary(&c.templates.upload_summary, items)))
                        }}
                    </p>
                    <span class=css::progressTrack>
                        <span
                            class=css::progressBar
                            style:width=move || format!("{}%", percent.get().round())
                        ></span>
                    </span>
                    <ul class=css::files>
                        <For
                            each=move || items.get().into_iter().enumerate()
                            key=|(index, item)| (*index, item.name.clone())
                            children=move |(_, item)| {
                                view! {
                                    <li class=css::file>
                                        <span class=css::fileName>{item.name}</span>
                                        <span class=css::fileSize>{format_size(item.size)}</span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                    {move || {
                        failure
                            .get()
                            .map(|error| {
                                let message = ctx
                                    .config
                                    .with_value(|c| {
                                        substitute(
                                            &c.templates.upload_failed,
                                            &HashMap::from([("error", error)]),
                                        )
                                    });
                                view! {
                                    <div class=css::failure role="alert">
                                        <span class=css::failureIcon>
                                            <Icon icon=ic::ALERT />
                                        </span>
                                        <span class=css::failureMessage>{message}</span>
                                        <button
                                            class=css::dismiss
                                            type="button"
                                            aria-label="Dismiss"
                                            on:click=move |_| ctx.dismiss_upload(panel)
                                        >
                                            <Icon icon=ic::CLOSE />
                                        </button>
                                    </div>
                                }
                            })
                    }}
                </div>
            </div>
        </Show>
    }
}
