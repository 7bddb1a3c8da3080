mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::CacDashboardApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::parse();
    log::info!("Dataset: {}", config.dataset_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Customer Acquisition Cost Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(CacDashboardApp::new(&config)))),
    )
}
