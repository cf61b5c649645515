//! Directory listing rows.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::FinderContext;
use crate::components::icons as ic;
use crate::core::PanelId;
use crate::models::{FileType, ListingEntry};

stylance::import_crate_style!(css, "src/components/finder/listing.module.css");

#[component]
pub fn DirectoryListing(
    panel: PanelId,
    entries: Vec<ListingEntry>,
    selected: Signal<Option<usize>>,
) -> impl IntoView {
    let ctx = use_context::<FinderContext>().expect("FinderContext must be provided");

    if entries.is_empty() {
        return view! { <p class=css::empty>"Empty folder"</p> }.into_any();
    }

    let rows = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let navigable = entry.target().is_some();
            let is_dir = entry.is_directory();
            let icon = ic::for_file_type(FileType::from_entry(&entry));

            let row_class = move || {
                let mut class = css::row.to_string();
                if selected.get() == Some(index) {
                    class.push(' ');
                    class.push_str(css::selected);
                }
                if !navigable {
                    class.push(' ');
                    class.push_str(css::disabled);
                }
                class
            };

            // Clicking the marked row again is a no-op in the stack.
            let on_click = move |ev: leptos::ev::MouseEvent| {
                ev.prevent_default();
                if navigable {
                    ctx.open_entry(panel, index);
                }
            };

            view! {
                <li class=row_class title=entry.relative_path on:click=on_click>
                    <span class=css::icon>
                        <Icon icon=icon />
                    </span>
                    <span class=css::name>{entry.name}</span>
                    {is_dir.then(|| view! {
                        <span class=css::chevron>
                            <Icon icon=ic::CHEVRON_RIGHT />
                        </span>
                    })}
                </li>
            }
        })
        .collect_view();

    view! { <ul class=css::list role="listbox">{rows}</ul> }.into_any()
}
