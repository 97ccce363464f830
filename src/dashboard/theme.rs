//! Dashboard theme and styling
//!
//! Slate chrome around a light "paper" panel that the grid is drawn on, so
//! the dark-gray digits stay readable.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Dashboard color palette
pub struct ThemeColors;

impl ThemeColors {
    pub const BG_DARK: Color32 = Color32::from_rgb(22, 26, 31);
    pub const BG_MEDIUM: Color32 = Color32::from_rgb(32, 37, 44);
    pub const BG_LIGHT: Color32 = Color32::from_rgb(44, 50, 59);
    pub const BG_HOVER: Color32 = Color32::from_rgb(56, 63, 74);

    /// Puzzle paper behind the grid
    pub const PAPER: Color32 = Color32::from_rgb(246, 244, 238);

    /// Matches the solved-digit green
    pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(42, 193, 42);
    pub const ACCENT_SUCCESS: Color32 = Color32::from_rgb(96, 208, 120);
    pub const ACCENT_WARNING: Color32 = Color32::from_rgb(240, 180, 40);
    pub const ACCENT_ERROR: Color32 = Color32::from_rgb(224, 82, 70);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(232, 234, 237);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(165, 170, 178);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(110, 116, 126);

    pub const BORDER: Color32 = Color32::from_rgb(60, 67, 78);
}

/// Install the palette, widget rounding and text sizes on the context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = visuals();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(14.0, 6.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

fn visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.panel_fill = ThemeColors::BG_DARK;
    visuals.window_fill = ThemeColors::BG_MEDIUM;
    visuals.extreme_bg_color = ThemeColors::BG_DARK;
    visuals.faint_bg_color = ThemeColors::BG_LIGHT;
    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);

    let widgets = &mut visuals.widgets;
    for (state, fill) in [
        (&mut widgets.inactive, ThemeColors::BG_LIGHT),
        (&mut widgets.hovered, ThemeColors::BG_HOVER),
        (&mut widgets.active, ThemeColors::ACCENT_PRIMARY),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_PRIMARY);
        state.rounding = Rounding::same(6.0);
    }

    visuals.selection.bg_fill = color_with_alpha(ThemeColors::ACCENT_PRIMARY, 70);
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::ACCENT_PRIMARY);

    visuals
}

/// Same color with a different alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_with_alpha_keeps_rgb() {
        let faded = color_with_alpha(ThemeColors::ACCENT_ERROR, 70);
        assert_eq!(faded.a(), 70);
        assert_eq!(ThemeColors::PAPER.a(), 255);
    }
}
