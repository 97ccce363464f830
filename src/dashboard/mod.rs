//! Dashboard UI Module
//!
//! Desktop window for loading a puzzle photo, running a scan and viewing the
//! recognized digits on the grid.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::run_dashboard;
