#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Animated portfolio page: a WebGL background with three switchable scene
//! variants plus a filterable project showcase (hero carousel, search grid,
//! detail overlay). Everything that carries recurring state lives in the
//! target-independent modules below so it can be unit tested on the host;
//! only the `wasm` module touches the browser.

pub mod carousel;
pub mod config;
pub mod gallery;
pub mod scene;

// Only compile browser-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod loader;
    mod page;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("folio starting");

        page::boot()
    }
}
