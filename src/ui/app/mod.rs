use std::sync::Arc;

use chrono::Local;
use eframe::egui;
use poll_promise::Promise;
use tracing::{info, warn};

use sentinel::actions::{self, SysinfoControl};
use sentinel::audit::AuditLog;
use sentinel::network::interface_status;
use sentinel::scheduler::ScanScheduler;
use sentinel::{ScanReport, Scanner, SentinelConfig};

use crate::theme;
use crate::ui::{scan_ui, settings_ui};

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Tab {
    Scan,
    Settings,
}

/// Feedback line shown under the action buttons.
#[derive(Debug, Clone)]
pub enum StatusMessage {
    Info(String),
    Warning(String),
}

pub struct SentinelApp {
    pub active_tab: Tab,
    pub theme: theme::Theme,
    pub config: SentinelConfig,
    pub scanner: Arc<Scanner>,
    pub audit_log: Arc<AuditLog>,
    pub scheduler: ScanScheduler,
    pub scan_promise: Option<Promise<Result<ScanReport, String>>>,
    pub last_report: Option<ScanReport>,
    pub last_scan_error: Option<String>,
    pub action_promise: Option<Promise<Result<String, String>>>,
    pub interface_promise: Option<Promise<bool>>,
    pub interface_up: Option<bool>,
    pub status_message: Option<StatusMessage>,
    pub show_all_processes: bool,
    pub is_elevated: bool,
}

impl SentinelApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SentinelConfig, scanner: Scanner) -> Self {
        let scheduler = ScanScheduler::new(config.auto_scan_interval_secs);
        let audit_log = AuditLog::new(config.audit_log_path.clone());

        let mut app = Self {
            active_tab: Tab::Scan,
            theme: theme::initial_theme(),
            config,
            scanner: Arc::new(scanner),
            audit_log: Arc::new(audit_log),
            scheduler,
            scan_promise: None,
            last_report: None,
            last_scan_error: None,
            action_promise: None,
            interface_promise: None,
            interface_up: None,
            status_message: None,
            show_all_processes: false,
            is_elevated: sentinel::utils::is_elevated(),
        };
        app.refresh_interface_status();
        app
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_promise.is_some()
    }

    pub fn is_acting(&self) -> bool {
        self.action_promise.is_some()
    }

    /// Starts a scan unless one is already running.
    pub fn start_scan(&mut self) {
        if self.is_scanning() {
            return;
        }
        self.scheduler.mark_run(Local::now());

        let scanner = Arc::clone(&self.scanner);
        let audit_log = Arc::clone(&self.audit_log);
        self.scan_promise = Some(Promise::spawn_thread("scan", move || {
            let report = scanner.scan_blocking().map_err(|e| e.to_string())?;
            if let Err(e) = audit_log.append(&report, &Local::now()) {
                warn!("Could not append to audit log {}: {}", audit_log.path().display(), e);
            }
            Ok(report)
        }));
    }

    pub fn refresh_interface_status(&mut self) {
        if self.interface_promise.is_some() {
            return;
        }
        let runner = self.scanner.runner();
        let name = self.scanner.interface_name().to_string();
        self.interface_promise = Some(Promise::spawn_thread("interface_status", move || {
            interface_status(runner.as_ref(), &name).up
        }));
    }

    pub fn terminate_process(&mut self, pid: u32) {
        if self.is_acting() {
            return;
        }
        let Some(report) = self.last_report.clone() else {
            return;
        };
        info!("Termination requested for PID {}", pid);
        self.action_promise = Some(Promise::spawn_thread("terminate", move || {
            actions::terminate(&report, pid, &SysinfoControl).map_err(|e| e.to_string())
        }));
    }

    pub fn disable_interface(&mut self) {
        if self.is_acting() {
            return;
        }
        let runner = self.scanner.runner();
        let name = self.scanner.interface_name().to_string();
        info!("Disable requested for interface {}", name);
        self.action_promise = Some(Promise::spawn_thread("disable_interface", move || {
            actions::disable_interface(runner.as_ref(), &name).map_err(|e| e.to_string())
        }));
    }

    fn poll_promises(&mut self) {
        if let Some(promise) = self.scan_promise.take() {
            match promise.try_take() {
                Ok(Ok(report)) => {
                    self.interface_up = Some(report.network.up);
                    self.last_report = Some(report);
                    self.last_scan_error = None;
                }
                Ok(Err(e)) => {
                    warn!("Scan failed: {}", e);
                    self.last_scan_error = Some(e);
                }
                Err(promise) => self.scan_promise = Some(promise),
            }
        }

        if let Some(promise) = self.action_promise.take() {
            match promise.try_take() {
                Ok(Ok(message)) => {
                    self.status_message = Some(StatusMessage::Info(message));
                    self.refresh_interface_status();
                }
                Ok(Err(e)) => self.status_message = Some(StatusMessage::Warning(e)),
                Err(promise) => self.action_promise = Some(promise),
            }
        }

        if let Some(promise) = self.interface_promise.take() {
            match promise.try_take() {
                Ok(up) => self.interface_up = Some(up),
                Err(promise) => self.interface_promise = Some(promise),
            }
        }
    }
}

impl eframe::App for SentinelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.theme.visuals.clone());

        self.poll_promises();
        if self.scheduler.is_due(Local::now()) && !self.is_scanning() {
            info!("Automatic scan due");
            self.start_scan();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.selectable_label(self.active_tab == Tab::Scan, "🔍 Scan").clicked() {
                    self.active_tab = Tab::Scan;
                }
                if ui.selectable_label(self.active_tab == Tab::Settings, "⚙️ Settings").clicked() {
                    self.active_tab = Tab::Settings;
                }
            });

            ui.separator();

            let theme_clone = self.theme.clone();
            match self.active_tab {
                Tab::Scan => scan_ui::draw_scan_tab(self, ui, &theme_clone),
                Tab::Settings => settings_ui::draw_settings_tab(self, ui),
            }
        });

        if self.is_scanning() || self.is_acting() || self.interface_promise.is_some() {
            ctx.request_repaint();
        } else if self.scheduler.is_enabled() {
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }
    }
}
