//! # messenger-client
//!
//! Leptos frontend for the Messenger chat application: the root layout, the
//! sign-in / registration form, and the reusable controls it is built from.
//! Compiled with `ssr` for server rendering and with `hydrate` for the
//! browser bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
