//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use web_sys::{Element, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Find an element by id in the current document.
pub fn element_by_id(id: &str) -> Option<Element> {
    window()?.document()?.get_element_by_id(id)
}

/// Rendered width of an element in CSS pixels.
///
/// Falls back to `right - left` for engines that report a zero width.
pub fn element_width(element: &Element) -> f64 {
    let rect = element.get_bounding_client_rect();
    let width = rect.width();
    if width > 0.0 {
        width
    } else {
        (rect.right() - rect.left()).max(0.0)
    }
}

/// Rendered size (width, height) of an element in CSS pixels.
pub fn element_size(element: &Element) -> (f64, f64) {
    let rect = element.get_bounding_client_rect();
    (rect.width(), rect.height())
}

/// Current URL fragment without the leading `#`, if any.
pub fn location_hash() -> Option<String> {
    let hash = window()?.location().hash().ok()?;
    let path = hash.trim_start_matches('#');
    (!path.is_empty()).then(|| path.to_string())
}
