//! Dashboard views

pub mod scan;
pub mod settings;

pub use scan::{render_scan_view, ScanPanel};
pub use settings::render_settings_view;
