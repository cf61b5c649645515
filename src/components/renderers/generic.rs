//! Generic file details, used when no registered pattern matches.

use leptos::prelude::*;

use super::{FileRenderer, css};
use crate::config::FinderConfig;
use crate::models::FileDescriptor;
use crate::utils::format_size;

/// Fallback renderer: name, path and size.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericRenderer;

impl FileRenderer for GenericRenderer {
    fn render(&self, file: &FileDescriptor, _config: &FinderConfig) -> AnyView {
        view! { <FileDetails file=file.clone() /> }.into_any()
    }
}

/// Definition list describing a file.
///
/// `dimensions`, when given, adds a row between path and size.
#[component]
pub fn FileDetails(
    file: FileDescriptor,
    #[prop(optional)] dimensions: Option<Signal<String>>,
) -> impl IntoView {
    let size = file.size.map(format_size).unwrap_or_else(|| "-".to_string());

    view! {
        <div class=css::details>
            <dl>
                <dt>"Name"</dt>
                <dd>{file.name}</dd>
                <dt>"Path"</dt>
                <dd>{file.relative_path}</dd>
                {dimensions.map(|dimensions| view! {
                    <dt>"Dimensions"</dt>
                    <dd>{move || dimensions.get()}</dd>
                })}
                <dt>"File size"</dt>
                <dd>{size}</dd>
            </dl>
        </div>
    }
}
