//! # client
//!
//! Leptos + WASM front-end for the PDF QA system: a chat box with a text
//! field and submit button, plus a PDF upload widget that posts to the
//! backend's `/api/upload` endpoint.
//!
//! The crate builds in two modes. `hydrate` is the browser bundle and owns
//! all DOM, network, and timer access. `ssr` is linked into the server for
//! the initial HTML render. Pure state and validation logic compiles in
//! both and is what the unit tests exercise.

pub mod app;
pub mod components;
pub mod net;
pub mod state;

/// WASM entry point: install panic/log hooks and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
