//! Sudoku grid widget
//!
//! Allocates a square area, paints the paper background and hands the
//! painter to [`GridRenderer`].

use egui::{Rounding, Sense, Vec2};

use crate::dashboard::theme::ThemeColors;
use crate::grid::{GridData, GridGeometry};
use crate::render::{GridRenderer, GridStyle};

/// Draw `data` into a square of at most `max_side` points
pub fn render_sudoku_view(
    ui: &mut egui::Ui,
    data: &GridData,
    style: &GridStyle,
    inset: f32,
    max_side: f32,
) -> egui::Response {
    let side = ui.available_width().min(max_side).max(0.0);
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());

    if ui.is_rect_visible(rect) {
        let mut painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::same(4.0), ThemeColors::PAPER);

        let geometry = GridGeometry::new(rect, inset);
        GridRenderer::new(style).render(data, &geometry, &mut painter);

        if let Some((column, row)) = response.hover_pos().and_then(|p| geometry.cell_at(p)) {
            let text = match data.cell(column, row) {
                Some(entry) => format!("r{}c{}: {}", row + 1, column + 1, entry.value()),
                None => format!("r{}c{}: empty", row + 1, column + 1),
            };
            return response.on_hover_text(text);
        }
    }

    response
}
