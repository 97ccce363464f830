//! Reusable UI components for the dashboard

pub mod sidebar;
pub mod status_card;
pub mod sudoku_view;

pub use sidebar::render_sidebar;
pub use status_card::{CardStatus, StatusCard};
pub use sudoku_view::render_sudoku_view;
