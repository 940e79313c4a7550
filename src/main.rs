use anyhow::{anyhow, Context, Result};
use eframe::egui::{self, Vec2};
use tracing::{info, warn};

use sentinel::config::{self, SentinelConfig};
use sentinel::Scanner;

use crate::ui::app::SentinelApp;
use crate::ui::icons::create_app_icon;

mod theme;
mod ui;

fn main() -> Result<()> {
    let _log_guard = sentinel::logging::init(&config::data_dir().join("logs"))?;

    let config_path = SentinelConfig::config_path();
    let config = SentinelConfig::load_from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    info!("Configuration loaded from {}", config_path.display());

    if !sentinel::utils::is_elevated() {
        warn!("Not running as administrator: disabling the network interface will fail.");
    }

    let scanner = Scanner::from_config(&config).context("Failed to build scanner")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(640.0, 720.0))
            .with_min_inner_size(Vec2::new(480.0, 400.0))
            .with_icon(create_app_icon()),
        centered: true,
        default_theme: eframe::Theme::Dark,
        follow_system_theme: false,
        ..Default::default()
    };

    eframe::run_native(
        "Sentinel - Process Scanner",
        options,
        Box::new(move |cc| Box::new(SentinelApp::new(cc, config, scanner))),
    )
    .map_err(|e| anyhow!("UI error: {}", e))
}
