//! Ad Preview Editor
//!
//! A desktop editor for customizing an advertisement template with a live
//! composited preview.

mod app;
mod components;
mod constants;
mod core;
mod logging;
mod state;
mod template;
mod utils;

use dioxus::desktop::{Config, WindowBuilder, LogicalSize};

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Failed to initialise logging: {}", err);
    }

    template::install(template::TemplateConfig::discover());

    // Configure the window
    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Ad Preview Editor")
                .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
                .with_resizable(true)
        )
        .with_menu(None); // Disable default menu bar

    // Launch the Dioxus desktop application
    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
