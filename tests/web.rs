#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn canvas_can_be_mounted() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let body = document.body().expect("body element not found");

    let canvas: web_sys::HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_id("bg-canvas");
    canvas.set_width(320);
    canvas.set_height(240);
    body.append_child(&canvas).unwrap();

    let rect = document
        .get_element_by_id("bg-canvas")
        .expect("canvas element not found")
        .get_bounding_client_rect();

    assert!(rect.width() > 0.0 && rect.height() > 0.0);
}
