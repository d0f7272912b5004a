//! Nerd AI Web Frontend
//!
//! Leptos-based WASM frontend: landing page plus the Nerd AI chat view.

mod app;
mod components;
mod pages;
mod storage;

pub use app::App;
pub use storage::BrowserStorage;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
