//! Settings view - recognition and grid drawing options

use egui::RichText;

use crate::config::{AppConfig, GridSettings, RecognitionSettings};
use crate::dashboard::state::{SettingsSection, SettingsViewState};
use crate::dashboard::theme::ThemeColors;
use crate::vision::SplitMode;

/// Render the settings view
pub fn render_settings_view(
    ui: &mut egui::Ui,
    view_state: &mut SettingsViewState,
    config: &mut AppConfig,
) {
    ui.heading(RichText::new("Settings").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Tune how recognized text becomes digits and how the grid is drawn")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );

    ui.add_space(24.0);

    let mut changed = false;

    egui::ScrollArea::vertical().show(ui, |ui| {
        collapsible_section(ui, view_state, SettingsSection::Recognition, "Recognition", |ui| {
            changed |= recognition_settings(ui, &mut config.recognition);
        });

        ui.add_space(16.0);

        collapsible_section(ui, view_state, SettingsSection::Grid, "Grid", |ui| {
            changed |= grid_settings(ui, &mut config.grid);
        });

        ui.add_space(24.0);

        ui.horizontal(|ui| {
            if ui.button("Reset to Defaults").clicked() {
                config.recognition = RecognitionSettings::default();
                config.grid = GridSettings::default();
                changed = true;
            }
        });
    });

    if changed {
        view_state.has_unsaved_changes = true;
    }
}

/// Framed section with a clickable header; only one section is open at a time
fn collapsible_section(
    ui: &mut egui::Ui,
    view_state: &mut SettingsViewState,
    section: SettingsSection,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    let is_expanded = view_state.expanded_section == Some(section);

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            let header_response = ui
                .horizontal(|ui| {
                    let arrow = if is_expanded { "v" } else { ">" };
                    ui.label(RichText::new(arrow).size(12.0).color(ThemeColors::TEXT_MUTED));
                    ui.add_space(8.0);
                    ui.heading(RichText::new(title).size(16.0));
                })
                .response;

            if header_response.interact(egui::Sense::click()).clicked() {
                view_state.expanded_section = if is_expanded { None } else { Some(section) };
            }

            if is_expanded {
                ui.add_space(16.0);
                ui.separator();
                ui.add_space(12.0);
                add_contents(ui);
            }
        });
}

fn recognition_settings(ui: &mut egui::Ui, settings: &mut RecognitionSettings) -> bool {
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.label("Split merged digits:");
        ui.add_space(8.0);
        egui::ComboBox::from_id_salt("split_mode")
            .selected_text(split_mode_label(settings.split_mode))
            .show_ui(ui, |ui| {
                for mode in [SplitMode::Legacy, SplitMode::Proportional] {
                    changed |= ui
                        .selectable_value(&mut settings.split_mode, mode, split_mode_label(mode))
                        .changed();
                }
            });
    });

    ui.horizontal(|ui| {
        ui.label("Require confirmation for \"1\":");
        ui.add_space(8.0);
        changed |= ui.checkbox(&mut settings.require_one_confirmation, "").changed();
    });

    ui.add_enabled_ui(settings.require_one_confirmation, |ui| {
        ui.horizontal(|ui| {
            ui.label("Candidates inspected:");
            ui.add_space(8.0);
            changed |= ui
                .add(egui::Slider::new(&mut settings.alternate_count, 1..=20))
                .changed();
        });

        ui.horizontal(|ui| {
            ui.label("Votes needed (more than):");
            ui.add_space(8.0);
            changed |= ui
                .add(egui::Slider::new(&mut settings.one_confirmation_threshold, 0..=20))
                .changed();
        });
    });

    ui.add_space(8.0);
    ui.label(
        RichText::new("Changes apply to the next scan")
            .size(12.0)
            .color(ThemeColors::TEXT_MUTED),
    );

    changed
}

fn grid_settings(ui: &mut egui::Ui, settings: &mut GridSettings) -> bool {
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.label("Digit size:");
        ui.add_space(8.0);
        changed |= ui
            .add(egui::Slider::new(&mut settings.font_size, 10.0..=48.0).suffix(" pt"))
            .changed();
    });

    ui.horizontal(|ui| {
        ui.label("Minor line width:");
        ui.add_space(8.0);
        changed |= ui
            .add(egui::Slider::new(&mut settings.minor_line_width, 0.5..=5.0))
            .changed();
    });

    ui.horizontal(|ui| {
        ui.label("Major line width:");
        ui.add_space(8.0);
        changed |= ui
            .add(egui::Slider::new(&mut settings.major_line_width, 0.5..=8.0))
            .changed();
    });

    ui.horizontal(|ui| {
        ui.label("Digit color:");
        ui.add_space(8.0);
        changed |= ui.color_edit_button_srgb(&mut settings.initial_color).changed();
        ui.add_space(16.0);
        ui.label("Solved color:");
        ui.add_space(8.0);
        changed |= ui.color_edit_button_srgb(&mut settings.solved_color).changed();
    });

    changed
}

fn split_mode_label(mode: SplitMode) -> &'static str {
    match mode {
        SplitMode::Legacy => "Legacy",
        SplitMode::Proportional => "Proportional",
    }
}
