//! ZWatch - Leptos browser client
//!
//! Reactive web UI over the ZWatch client core: sign-in, quick checks, site
//! registration and the per-URL check timeline.

pub mod app;
pub mod browser;
pub mod components;
pub mod dispatch;

pub use app::App;

/// WASM entry point
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    tracing::info!("Starting ZWatch");
    leptos::mount::mount_to_body(App);
}
