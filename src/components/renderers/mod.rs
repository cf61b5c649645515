//! File renderer registry.
//!
//! A file panel is filled by the first registered renderer whose pattern
//! matches the file name; [`GenericRenderer`] handles everything else.
//!
//! The registry is a shared handle: clones refer to the same ordered list, so
//! a renderer registered on any clone applies to every later render of every
//! widget holding that registry.
//!
//! ```ignore
//! let registry = RendererRegistry::with_builtins();
//! registry.register_pattern(r"\.md$", |file: &FileDescriptor, _: &FinderConfig| {
//!     view! { <p>{file.name.clone()}</p> }.into_any()
//! })?;
//! ```

mod generic;
mod image;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use regex::Regex;

use crate::config::FinderConfig;
use crate::models::FileDescriptor;

pub use generic::{FileDetails, GenericRenderer};
pub use image::{ImagePreview, ImageRenderer, fit_within};

stylance::import_crate_style!(css, "src/components/renderers/renderers.module.css");

/// Pattern the built-in image renderer is registered under.
pub const IMAGE_PATTERN: &str = r"(?i-u)\.(png|jpe?g|gif|webp|svg|bmp|ico|avif)$";

/// Fills a file panel.
pub trait FileRenderer {
    fn render(&self, file: &FileDescriptor, config: &FinderConfig) -> AnyView;
}

impl<F> FileRenderer for F
where
    F: Fn(&FileDescriptor, &FinderConfig) -> AnyView,
{
    fn render(&self, file: &FileDescriptor, config: &FinderConfig) -> AnyView {
        self(file, config)
    }
}

/// Position of a registration, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererId(usize);

struct Registration {
    pattern: Regex,
    renderer: Rc<dyn FileRenderer>,
}

/// Ordered, first-match-wins list of renderers.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    registrations: Rc<RefCell<Vec<Registration>>>,
}

impl RendererRegistry {
    /// Registry without any pattern; every file gets the generic renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in image renderer.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        let pattern = Regex::new(IMAGE_PATTERN).expect("image pattern is valid");
        registry.register(pattern, ImageRenderer);
        registry
    }

    /// Append a renderer. Earlier registrations take precedence.
    pub fn register(&self, pattern: Regex, renderer: impl FileRenderer + 'static) -> RendererId {
        let mut registrations = self.registrations.borrow_mut();
        registrations.push(Registration {
            pattern,
            renderer: Rc::new(renderer),
        });
        RendererId(registrations.len() - 1)
    }

    /// Compile `pattern` and register it.
    pub fn register_pattern(
        &self,
        pattern: &str,
        renderer: impl FileRenderer + 'static,
    ) -> Result<RendererId, regex::Error> {
        Ok(self.register(Regex::new(pattern)?, renderer))
    }

    /// First registration matching `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<RendererId> {
        self.registrations
            .borrow()
            .iter()
            .position(|r| r.pattern.is_match(name))
            .map(RendererId)
    }

    pub fn len(&self) -> usize {
        self.registrations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render `file` with its matching renderer or the generic one.
    pub fn render_file(&self, file: &FileDescriptor, config: &FinderConfig) -> AnyView {
        // Release the borrow before rendering; renderers may register more.
        let renderer = self
            .resolve(&file.name)
            .map(|RendererId(index)| Rc::clone(&self.registrations.borrow()[index].renderer));

        view! {
            <div class=css::filePanel>
                {match renderer {
                    Some(renderer) => renderer.render(file, config),
                    None => GenericRenderer.render(file, config),
                }}
            </div>
        }
        .into_any()
    }
}
