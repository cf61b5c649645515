//! Browser tests for the DOM and URL helpers and the signal-backed host.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use finder::FileDescriptor;
use finder::components::finder::{SignalHost, panel_dom_id};
use finder::core::{PanelHost, PanelStack, ScrollGeometry};
use finder::utils::dom::{element_by_id, element_size, element_width, location_hash};
use finder::utils::endpoint_url;
use leptos::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_box(id: &str, style: &str) -> web_sys::Element {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document available");
    let element = document.create_element("div").expect("create div");
    element.set_id(id);
    element.set_attribute("style", style).expect("set style");
    document
        .body()
        .expect("body available")
        .append_child(&element)
        .expect("append div");
    element
}

#[wasm_bindgen_test]
fn test_endpoint_url_encodes_path() {
    let url = endpoint_url("/api/list", "/photos/summer 2024").unwrap();
    assert!(url.starts_with("http"));
    assert!(url.ends_with("/api/list?path=%2Fphotos%2Fsummer+2024"));
}

#[wasm_bindgen_test]
fn test_endpoint_url_keeps_existing_query() {
    let url = endpoint_url("https://example.com/list?token=abc", "/").unwrap();
    assert_eq!(url, "https://example.com/list?token=abc&path=%2F");
}

#[wasm_bindgen_test]
fn test_endpoint_url_replaces_path_param() {
    let url = endpoint_url("https://example.com/list?path=old", "/new").unwrap();
    assert_eq!(url, "https://example.com/list?path=%2Fnew");
}

#[wasm_bindgen_test]
fn test_element_measurements() {
    let element = mount_box("finder-test-box", "width: 120px; height: 30px;");
    assert_eq!(element_width(&element), 120.0);
    assert_eq!(element_size(&element), (120.0, 30.0));

    let found = element_by_id("finder-test-box").expect("element by id");
    assert_eq!(element_width(&found), 120.0);
    element.remove();
}

#[wasm_bindgen_test]
fn test_missing_element() {
    assert!(element_by_id("finder-test-missing").is_none());
}

#[wasm_bindgen_test]
fn test_location_hash_absent() {
    assert_eq!(location_hash(), None);
}

#[wasm_bindgen_test]
async fn test_signal_host_records_rendered_width() {
    let stack = RwSignal::new(PanelStack::new(100.0));
    let host = SignalHost::new(stack);
    let listing: FileDescriptor =
        serde_json::from_str(r#"{"type": "directory", "files": []}"#).unwrap();

    let id = host.update(|s| s.begin_load("/")).unwrap();
    host.update(|s| s.complete_load(id, listing)).unwrap().unwrap();
    let element = mount_box(
        &panel_dom_id(host.instance(), id),
        "width: 180px; height: 10px;",
    );

    host.settle(id).await;

    assert_eq!(stack.with_untracked(|s| s.widths().to_vec()), vec![180.0]);
    assert_eq!(
        stack.with_untracked(PanelStack::geometry),
        ScrollGeometry {
            total_width: 180.0,
            scroll_left: 80.0,
        }
    );
    element.remove();
}

#[wasm_bindgen_test]
async fn test_signal_host_ignores_unrendered_panel() {
    let stack = RwSignal::new(PanelStack::new(100.0));
    let host = SignalHost::new(stack);
    let listing: FileDescriptor =
        serde_json::from_str(r#"{"type": "directory", "files": []}"#).unwrap();

    let id = host.update(|s| s.begin_load("/")).unwrap();
    host.update(|s| s.complete_load(id, listing)).unwrap().unwrap();
    host.settle(id).await;

    // No element with the panel id: the slot stays at zero, no scroll.
    assert_eq!(stack.with_untracked(|s| s.widths().to_vec()), vec![0.0]);
    assert_eq!(stack.with_untracked(PanelStack::geometry).scroll_left, 0.0);
}
