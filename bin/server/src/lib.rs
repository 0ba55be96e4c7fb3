//! listas web server and UI.
//!
//! This crate provides the Leptos-based web interface: the login page, the
//! navigation bar and the pages behind it, plus the server-side glue to the
//! hosted auth service.

#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod pages;

#[cfg(feature = "ssr")]
pub mod auth;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod error;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
