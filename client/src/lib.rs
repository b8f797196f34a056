//! # client
//!
//! Leptos + WASM presentation layer of the Probler console: login and
//! registration, the section-based console shell, and the domain views that
//! render Layer 8 backend records into tables and editing dialogs.
//!
//! All pure logic (session handling, query building, table paging, config
//! parsing, formatting) compiles and is tested without the `hydrate` feature.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
pub mod views;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
