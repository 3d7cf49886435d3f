// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Wildlife Monitor
//!
//! A cross-platform desktop application for importing wildlife camera media,
//! overlaying detector boxes on it and reviewing activity trends.

mod api;
mod app;
mod config;
mod io;
mod models;
mod tasks;
mod ui;
mod util;

use anyhow::Result;
use app::WildwatchApp;
use config::Settings;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load()?;
    log::info!(
        "Starting in {} mode, confidence threshold {:.2}",
        settings.api_mode.label(),
        settings.confidence_threshold
    );

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Wildlife Monitor")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Wildlife Monitor",
        options,
        Box::new(|cc| Ok(Box::new(WildwatchApp::new(&cc.egui_ctx, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
