// Hide console window in release builds (Windows GUI app)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod catalog;
mod cli;
mod config;
mod installer;
mod state;
mod task;
mod ui;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Any arguments mean CLI mode, no window
    let cli_mode = std::env::args().len() > 1;

    // Initialize logging. CLI runs stay quiet unless RUST_LOG asks for more.
    let default_filter = if cli_mode {
        "quickinstall=warn"
    } else {
        "quickinstall=debug,info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli_mode {
        let cli = cli::Cli::parse();
        return cli::run(cli).await;
    }

    tracing::info!("Starting Quick Install");

    // Configure native options
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([700.0, 640.0])
        .with_min_inner_size([520.0, 420.0])
        .with_title("Quick Install");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Quick Install",
        native_options,
        Box::new(|cc| Ok(Box::new(app::QuickInstallApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
