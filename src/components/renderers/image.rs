//! Image preview renderer.

use std::collections::HashMap;

use leptos::html;
use leptos::prelude::*;

use super::{FileDetails, FileRenderer, css};
use crate::config::{DIMENSIONS_PLACEHOLDER, FinderConfig, IMAGE_MARGIN_PX};
use crate::models::FileDescriptor;
use crate::utils::dom::element_size;
use crate::utils::substitute;

/// Built-in renderer for image files.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageRenderer;

impl FileRenderer for ImageRenderer {
    fn render(&self, file: &FileDescriptor, config: &FinderConfig) -> AnyView {
        view! {
            <ImagePreview
                file=file.clone()
                src=config.asset_url(&file.relative_path)
                dimensions_template=config.templates.dimensions.clone()
            />
        }
        .into_any()
    }
}

/// Shrink `natural` (width, height) to fit `available`, keeping the aspect ratio.
///
/// Width is constrained first, then height; the result is floored to whole pixels.
pub fn fit_within(natural: (f64, f64), available: (f64, f64)) -> (f64, f64) {
    let (mut width, mut height) = natural;
    let (max_width, max_height) = (available.0.max(0.0), available.1.max(0.0));

    if width > max_width {
        let ratio = max_width / width;
        width = max_width;
        height *= ratio;
    }
    if height > max_height {
        let ratio = max_height / height;
        height = max_height;
        width *= ratio;
    }

    (width.floor(), height.floor())
}

/// Image with its file details.
///
/// The dimensions row shows a placeholder until the image has loaded; the
/// image is then sized to the figure minus [`IMAGE_MARGIN_PX`] on each axis.
#[component]
pub fn ImagePreview(file: FileDescriptor, src: String, dimensions_template: String) -> impl IntoView {
    let figure_ref = NodeRef::<html::Figure>::new();
    let image_ref = NodeRef::<html::Img>::new();
    let display_size = RwSignal::new(None::<(f64, f64)>);
    let dimensions = RwSignal::new(DIMENSIONS_PLACEHOLDER.to_string());
    let alt = file.name.clone();

    let on_load = move |_| {
        let (Some(image), Some(figure)) = (image_ref.get(), figure_ref.get()) else {
            return;
        };
        let (natural_width, natural_height) = (image.natural_width(), image.natural_height());
        let (figure_width, figure_height) = element_size(&figure);

        display_size.set(Some(fit_within(
            (f64::from(natural_width), f64::from(natural_height)),
            (figure_width - IMAGE_MARGIN_PX, figure_height - IMAGE_MARGIN_PX),
        )));

        let data = HashMap::from([
            ("width", natural_width.to_string()),
            ("height", natural_height.to_string()),
        ]);
        dimensions.set(substitute(&dimensions_template, &data));
    };

    let image_class = move || {
        if display_size.get().is_some() {
            format!("{} {}", css::image, css::isLoaded)
        } else {
            css::image.to_string()
        }
    };

    view! {
        <figure class=css::figure node_ref=figure_ref>
            <img
                node_ref=image_ref
                src=src
                alt=alt
                class=image_class
                style:width=move || display_size.get().map(|(w, _)| format!("{w}px")).unwrap_or_default()
                style:height=move || display_size.get().map(|(_, h)| format!("{h}px")).unwrap_or_default()
                on:load=on_load
            />
        </figure>
        <FileDetails file=file dimensions=dimensions.into() />
    }
}
