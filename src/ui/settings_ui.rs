use crate::theme;
use crate::ui::app::SentinelApp;
use eframe::egui;

use sentinel::SentinelConfig;

pub fn draw_settings_tab(app: &mut SentinelApp, ui: &mut egui::Ui) {
    ui.heading("Settings");

    ui.add_space(20.0);

    // --- Theme Selection ---
    ui.group(|ui| {
        ui.label("Theme");
        ui.horizontal(|ui| {
            if ui.selectable_label(app.theme.name == "Light", "Light").clicked() {
                app.theme = theme::light_theme();
                ui.ctx().set_visuals(app.theme.visuals.clone());
            }
            if ui.selectable_label(app.theme.name == "Dark", "Dark").clicked() {
                app.theme = theme::dark_theme();
                ui.ctx().set_visuals(app.theme.visuals.clone());
            }
        });
    });

    ui.add_space(20.0);

    // --- Scoring rules (read-only, edit the config file) ---
    ui.group(|ui| {
        ui.label("Scoring rules");
        ui.separator();

        let engine = &app.config.engine;
        ui.label(format!(
            "Distracting apps: {}",
            join(&engine.distracting_apps)
        ));
        ui.label(format!(
            "Site keywords: {}",
            join(&engine.distracting_site_keywords)
        ));
        ui.label(format!("Browsers: {}", join(&engine.browser_apps)));
        ui.label(format!(
            "CPU > {:.1}%  |  Memory > {:.0} MB  |  flag at score {}",
            engine.cpu_threshold_percent, engine.mem_threshold_mb, engine.flag_score_threshold
        ));
        ui.label(format!(
            "Stealth: CPU > {:.1}% without a visible window ({:?})",
            engine.stealth_activity_threshold_percent, engine.stealth_policy
        ));
        ui.label(format!(
            "Protected paths: {}",
            join(&engine.protected_path_prefixes)
        ));
    });

    ui.add_space(20.0);

    // --- Scanning ---
    ui.group(|ui| {
        ui.label("Scanning");
        ui.separator();
        match app.config.auto_scan_interval_secs {
            Some(secs) => {
                ui.label(format!("Automatic scan every {} s", secs));
                if let Some(next) = app.scheduler.next_run() {
                    ui.label(format!("Next scan: {}", next.format("%H:%M:%S")));
                }
            }
            None => {
                ui.label("Manual scans only");
            }
        }
        ui.label(format!("Scan timeout: {} s", app.config.scan_timeout_secs));
        ui.label(format!("Audit log: {}", app.audit_log.path().display()));
        ui.label(format!(
            "Config file: {}",
            SentinelConfig::config_path().display()
        ));
    });

    ui.add_space(20.0);

    // --- About Section ---
    ui.group(|ui| {
        ui.label("About");
        ui.separator();
        ui.label(format!("Sentinel v{}", env!("CARGO_PKG_VERSION")));
        ui.horizontal(|ui| {
            ui.label("Built with");
            ui.hyperlink_to("egui", "https://github.com/emilk/egui");
            ui.label("and Rust.");
        });
    });
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
