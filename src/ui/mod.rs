pub mod app;
pub mod icons;
pub mod scan_ui;
pub mod settings_ui;
pub mod util;
