//! Scan view - photo selection, preview and the scanned grid

use egui::RichText;

use crate::dashboard::components::{render_sudoku_view, CardStatus, StatusCard};
use crate::dashboard::state::{ScanCommand, ScanStatus, ScanViewState};
use crate::dashboard::theme::ThemeColors;
use crate::grid::GridData;
use crate::render::GridStyle;

/// Read-only data the scan view displays
pub struct ScanPanel<'a> {
    pub grid: &'a GridData,
    pub style: &'a GridStyle,
    pub inset: f32,
    pub summary: &'a str,
    pub status: &'a ScanStatus,
    pub photo: Option<&'a egui::TextureHandle>,
    pub busy: bool,
    pub recognizer: &'a str,
}

/// Render the scan view. Button presses are recorded in `view_state.command`.
pub fn render_scan_view(ui: &mut egui::Ui, view_state: &mut ScanViewState, panel: &ScanPanel<'_>) {
    ui.heading(RichText::new("Scan").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new(format!(
            "Load a photo of a puzzle and place its digits ({} recognizer)",
            panel.recognizer
        ))
        .size(14.0)
        .color(ThemeColors::TEXT_SECONDARY),
    );

    ui.add_space(16.0);

    ui.horizontal(|ui| {
        ui.label("Photo:");
        ui.add(
            egui::TextEdit::singleline(&mut view_state.photo_path)
                .hint_text("/path/to/puzzle.jpg")
                .desired_width(360.0),
        );

        let scan_label = if panel.busy { "Scanning..." } else { "Scan photo" };
        if ui
            .add_enabled(!panel.busy, egui::Button::new(scan_label))
            .clicked()
        {
            view_state.command = Some(ScanCommand::Scan);
        }

        if ui.button("Solve").clicked() {
            view_state.command = Some(ScanCommand::Solve);
        }
    });

    ui.add_space(16.0);

    ui.horizontal_wrapped(|ui| {
        StatusCard::new("Status", status_value(panel.status), CardStatus::from(panel.status))
            .show(ui);
        ui.add_space(8.0);
        StatusCard::new("Digits", panel.grid.len().to_string(), CardStatus::Inactive).show(ui);
        if let ScanStatus::Done {
            regions, elapsed_ms, ..
        } = panel.status
        {
            ui.add_space(8.0);
            StatusCard::new("Text regions", regions.to_string(), CardStatus::Inactive).show(ui);
            ui.add_space(8.0);
            StatusCard::new("Time", format!("{} ms", elapsed_ms), CardStatus::Inactive).show(ui);
        }
    });

    if let ScanStatus::Failed(message) = panel.status {
        ui.add_space(8.0);
        ui.label(RichText::new(message).color(ThemeColors::ACCENT_ERROR));
    }

    ui.add_space(16.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_top(|ui| {
            let column_width = (ui.available_width() / 2.0 - 8.0).max(120.0);

            ui.vertical(|ui| {
                ui.set_width(column_width);
                ui.label(RichText::new("Grid").size(16.0).strong());
                ui.add_space(8.0);
                render_sudoku_view(ui, panel.grid, panel.style, panel.inset, 450.0);
            });

            ui.add_space(16.0);

            ui.vertical(|ui| {
                ui.set_width(column_width);
                ui.label(RichText::new("Photo").size(16.0).strong());
                ui.add_space(8.0);
                match panel.photo {
                    Some(texture) => {
                        ui.add(
                            egui::Image::new(texture)
                                .max_width(column_width)
                                .max_height(450.0)
                                .maintain_aspect_ratio(true),
                        );
                    }
                    None => {
                        ui.label(RichText::new("No photo loaded").color(ThemeColors::TEXT_MUTED));
                    }
                }
            });
        });

        ui.add_space(16.0);
        ui.label(RichText::new("Recognized text").size(16.0).strong());
        ui.add_space(4.0);
        if panel.summary.is_empty() {
            ui.label(RichText::new("Nothing recognized yet").color(ThemeColors::TEXT_MUTED));
        } else {
            ui.label(RichText::new(panel.summary).monospace());
        }
    });
}

fn status_value(status: &ScanStatus) -> String {
    match status {
        ScanStatus::Idle => "Idle".to_string(),
        ScanStatus::Scanning => "Scanning".to_string(),
        ScanStatus::Done { .. } => "Done".to_string(),
        ScanStatus::Failed(_) => "Failed".to_string(),
    }
}
