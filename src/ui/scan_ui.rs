use eframe::egui::{self, Layout, RichText};

use sentinel::utils::format_mb;
use sentinel::ClassifiedProcess;

use crate::theme::Theme;
use crate::ui::app::{SentinelApp, StatusMessage};
use crate::ui::util::centered_button;

/// Draws the scan tab: interface status, actions, and the latest report.
pub fn draw_scan_tab(app: &mut SentinelApp, ui: &mut egui::Ui, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.add_space(10.0);
        ui.heading("Process Disruption Scanner");
        ui.add_space(10.0);
    });

    // --- Interface status ---
    let interface_name = app.scanner.interface_name().to_string();
    match app.interface_up {
        Some(true) => ui.colored_label(
            theme.danger,
            format!("🌐 {}: Connected ⚠️", interface_name),
        ),
        Some(false) => ui.colored_label(
            theme.ok,
            format!("🌐 {}: Disabled ✅", interface_name),
        ),
        None => ui.colored_label(theme.muted, format!("🌐 {}: Unknown", interface_name)),
    };

    ui.add_space(10.0);

    // --- Actions ---
    let mut scan_clicked = false;
    let mut disable_clicked = false;

    ui.add_enabled_ui(!app.is_scanning(), |ui| {
        if centered_button(ui, "🔍 Scan for disruptive programs", 260.0).clicked() {
            scan_clicked = true;
        }
    });
    if app.is_scanning() {
        ui.vertical_centered(|ui| {
            ui.spinner();
        });
    }

    ui.add_space(5.0);
    ui.add_enabled_ui(!app.is_acting(), |ui| {
        let label = format!("📴 Reset: disable {}", interface_name);
        if centered_button(ui, &label, 260.0)
            .on_hover_text("Requires administrator privileges")
            .clicked()
        {
            disable_clicked = true;
        }
    });
    if !app.is_elevated {
        ui.vertical_centered(|ui| {
            ui.colored_label(
                theme.warning,
                "Not running as administrator: disabling the interface will fail.",
            );
        });
    }

    match &app.status_message {
        Some(StatusMessage::Info(message)) => {
            ui.colored_label(theme.ok, message);
        }
        Some(StatusMessage::Warning(message)) => {
            ui.colored_label(theme.warning, format!("⚠️ {}", message));
        }
        None => {}
    }

    ui.separator();

    if let Some(error) = &app.last_scan_error {
        ui.colored_label(theme.danger, format!("❌ {}", error));
    }

    // Collected during drawing, executed afterwards.
    let mut terminate_requests: Vec<u32> = Vec::new();

    match &app.last_report {
        None => {
            ui.colored_label(theme.muted, "No scan yet. Click 'Scan' to start.");
        }
        Some(report) => {
            ui.label(RichText::new("🧠 Scan Results:").strong());
            ui.label(format!(
                "{} processes scanned, {} flagged, {} stealth candidates",
                report.processes.len(),
                report.flagged().count(),
                report.stealth_candidates().count()
            ));
            if !report.stealth_checked {
                ui.colored_label(
                    theme.muted,
                    "Stealth detection unavailable: no window information on this system.",
                );
            }
            ui.checkbox(&mut app.show_all_processes, "Show all processes");

            let rows: Vec<&ClassifiedProcess> = if app.show_all_processes {
                report.processes.iter().collect()
            } else {
                report.notable().collect()
            };

            if rows.is_empty() {
                ui.colored_label(theme.ok, "✅ No major disruptive processes found.");
            } else {
                egui::ScrollArea::vertical()
                    .max_height(320.0)
                    .show(ui, |ui| {
                        for process in rows {
                            if draw_process_row(ui, process, theme) {
                                terminate_requests.push(process.pid);
                            }
                        }
                    });
            }

            if !report.distracting_sites.is_empty() {
                ui.add_space(10.0);
                egui::CollapsingHeader::new(format!(
                    "Distracting sites ({})",
                    report.distracting_sites.len()
                ))
                .default_open(true)
                .show(ui, |ui| {
                    for site in &report.distracting_sites {
                        ui.label(format!("🌍 {} ({})", site.title, site.keyword));
                    }
                });
            }
        }
    }

    if scan_clicked {
        tracing::info!("Manual scan requested");
        app.start_scan();
    }
    if disable_clicked {
        app.disable_interface();
    }
    for pid in terminate_requests {
        app.terminate_process(pid);
    }
}

/// One report row. Returns true when the terminate button was clicked.
fn draw_process_row(ui: &mut egui::Ui, process: &ClassifiedProcess, theme: &Theme) -> bool {
    let mut clicked = false;
    ui.group(|ui| {
        ui.horizontal(|ui| {
            let color = if process.flagged_high {
                theme.danger
            } else if process.stealth {
                theme.warning
            } else {
                ui.visuals().text_color()
            };
            let marker = if process.flagged_high { "⚠️" } else { "•" };
            ui.colored_label(
                color,
                format!(
                    "{} {} (PID {}) - CPU: {:.1}% | Memory: {}",
                    marker,
                    process.name,
                    process.pid,
                    process.cpu_percent,
                    format_mb(process.memory_mb)
                ),
            );
            ui.label(format!("score {}", process.score));
            if process.stealth {
                ui.colored_label(theme.warning, "👻 no window");
            }

            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                let button = ui
                    .add_enabled(process.safe_to_terminate, egui::Button::new("⛔ Terminate"));
                let button = if process.safe_to_terminate {
                    button
                } else {
                    button.on_disabled_hover_text("Protected: system path or system account")
                };
                if button.clicked() {
                    clicked = true;
                }
            });
        });
    });
    clicked
}
