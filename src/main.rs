mod app;
mod config;
mod heatmap;
mod inputs;
mod results;
mod state;
mod submission;
mod types;
mod worker;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stat Build Optimizer",
        options,
        Box::new(|cc| Ok(Box::new(app::OptimizerApp::new(cc)))),
    )
}
