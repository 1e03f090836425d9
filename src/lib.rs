mod api;
mod app;
mod components;
mod models;
mod pages;
mod payload;
mod research;
mod schedule;
mod state;
mod storage;
mod taxonomy;
mod topics;
mod trackers;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

pub use app::App;

fn init_logging() {
    #[cfg(target_family = "wasm")]
    {
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        // Only fails if a logger is already installed.
        let _ = console_log::init_with_level(level);
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    mount_to_body(App);
}
