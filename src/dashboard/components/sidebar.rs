//! Sidebar navigation component

use egui::{Color32, RichText, Rounding, Sense, Vec2};

use crate::dashboard::state::{DashboardView, ScanStatus};
use crate::dashboard::theme::{color_with_alpha, ThemeColors};

/// Render the sidebar: title, view switcher and a scan status line
pub fn render_sidebar(ui: &mut egui::Ui, current_view: &mut DashboardView, status: &ScanStatus) {
    ui.vertical(|ui| {
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new("Sudoku Scanner")
                    .size(18.0)
                    .color(ThemeColors::ACCENT_PRIMARY)
                    .strong(),
            );
        });

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(12.0);

        for view in [DashboardView::Scan, DashboardView::Settings] {
            if nav_button(ui, view, *current_view == view) {
                *current_view = view;
            }
            ui.add_space(4.0);
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(concat!("v", env!("CARGO_PKG_VERSION")))
                        .size(10.0)
                        .color(ThemeColors::TEXT_MUTED),
                );
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                let (color, text) = status_line(status);
                ui.label(RichText::new(text).size(12.0).color(color));
            });
            ui.add_space(8.0);
            ui.separator();
        });
    });
}

/// Short status text for the sidebar footer
fn status_line(status: &ScanStatus) -> (Color32, String) {
    match status {
        ScanStatus::Idle => (ThemeColors::TEXT_MUTED, "No scan yet".to_string()),
        ScanStatus::Scanning => (ThemeColors::ACCENT_WARNING, "Scanning...".to_string()),
        ScanStatus::Done { entries, .. } => {
            (ThemeColors::ACCENT_SUCCESS, format!("{} digits placed", entries))
        }
        ScanStatus::Failed(_) => (ThemeColors::ACCENT_ERROR, "Last scan failed".to_string()),
    }
}

/// Render a navigation button, returning whether it was clicked
fn nav_button(ui: &mut egui::Ui, view: DashboardView, is_selected: bool) -> bool {
    let desired_size = Vec2::new(ui.available_width() - 16.0, 36.0);
    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

    if ui.is_rect_visible(rect) {
        let (bg_color, text_color) = if is_selected {
            (color_with_alpha(ThemeColors::ACCENT_PRIMARY, 51), ThemeColors::ACCENT_PRIMARY)
        } else if response.hovered() {
            (ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY)
        } else {
            (Color32::TRANSPARENT, ThemeColors::TEXT_SECONDARY)
        };

        let painter = ui.painter();
        painter.rect_filled(rect.shrink2(Vec2::new(8.0, 0.0)), Rounding::same(6.0), bg_color);
        painter.text(
            rect.left_center() + Vec2::new(24.0, 0.0),
            egui::Align2::LEFT_CENTER,
            view.icon(),
            egui::FontId::monospace(14.0),
            text_color,
        );
        painter.text(
            rect.left_center() + Vec2::new(48.0, 0.0),
            egui::Align2::LEFT_CENTER,
            view.name(),
            egui::FontId::proportional(14.0),
            text_color,
        );
    }

    response.clicked()
}
