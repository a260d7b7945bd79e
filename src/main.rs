use eframe::egui;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::PathBuf;

mod ui;

use ui::AppState;

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("commnet_overlay"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    // Optional scene file given on the command line
    let scene_path = std::env::args_os().nth(1).map(PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CommNet Overlay",
        native_options,
        Box::new(move |cc| Ok(Box::new(AppState::new(cc.storage, scene_path)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the viewer: {}", e))
}
