//! QueryLens - SQL Query Analysis Front End
//!
//! Submits SQL queries to an analysis backend and renders the optimizer's
//! answer as an HTML report, built with Leptos and WebAssembly.

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    crate::ui::clipboard::install_copy_handler();
    leptos::mount::hydrate_body(App);
}
