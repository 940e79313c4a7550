//! Theme management for the application.

use eframe::egui::{self, Color32};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub visuals: egui::Visuals,
    /// Flagged processes, connected interface.
    pub danger: Color32,
    /// Disabled interface, successful actions.
    pub ok: Color32,
    pub warning: Color32,
    pub muted: Color32,
}

pub fn dark_theme() -> Theme {
    Theme {
        name: "Dark",
        visuals: egui::Visuals::dark(),
        danger: Color32::from_rgb(244, 67, 54),
        ok: Color32::from_rgb(100, 220, 100),
        warning: Color32::from_rgb(255, 193, 7),
        muted: Color32::GRAY,
    }
}

pub fn light_theme() -> Theme {
    Theme {
        name: "Light",
        visuals: egui::Visuals::light(),
        danger: Color32::from_rgb(198, 40, 40),
        ok: Color32::from_rgb(46, 125, 50),
        warning: Color32::from_rgb(230, 120, 0),
        muted: Color32::DARK_GRAY,
    }
}

pub fn initial_theme() -> Theme {
    dark_theme()
}
