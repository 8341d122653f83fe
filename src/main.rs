//! Notes & Todo Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod controllers;
mod error;
mod models;
mod session;
mod state;
mod storage;
mod transport;
mod view;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    mount_to_body(App);
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {}
