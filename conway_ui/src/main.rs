// main.rs - Game of Life editor window

use clap::Parser;
use eframe::egui;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod cli;
mod ui;

use conway::{LifeError, Simulation};
use ui::LifeApp;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Life(#[from] LifeError),

    #[error("failed to start tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("window error: {0}")]
    Ui(#[from] eframe::Error),
}

fn main() -> Result<(), AppError> {
    let args = cli::Args::parse();

    let filter = EnvFilter::new(args.log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.to_config()?;
    tracing::info!(
        grid = %config.grid,
        tick_ms = config.tick_interval_ms,
        tool = %config.tool,
        "starting Game of Life editor"
    );

    // The tick loop lives on this runtime; the window runs on the main thread.
    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 1000.0]),
        ..Default::default()
    };

    let simulation = Simulation::new(&config, runtime.handle().clone())?;

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let simulation = simulation.with_tick_hook(move || ctx.request_repaint());
            Box::new(LifeApp::new(simulation))
        }),
    )?;

    tracing::info!("window closed");
    drop(runtime);
    Ok(())
}
