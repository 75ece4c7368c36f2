#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use sketchpad::{AppConfig, PaintApp};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().unwrap_or_else(|err| {
        log::error!("{}, using default config", err);
        AppConfig::default()
    });

    // Optional background image passed on the command line
    let background = std::env::args_os().nth(1).map(PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sketchpad")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "sketchpad",
        native_options,
        Box::new(move |cc| {
            let mut app = PaintApp::new(cc, config);
            if let Some(path) = background {
                app.load_background_path(&path);
            }
            Ok(Box::new(app))
        }),
    )
}
