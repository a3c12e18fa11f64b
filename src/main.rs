//! Route Map Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod controller;
mod error;
mod forms;
mod geo;
mod logging;
mod models;
mod notify;
mod olmap;
mod scene;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(AppConfig::from_env().log_level);
    mount_to_body(App);
}
