//! egui painter surface

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke};

use super::Surface;

impl Surface for egui::Painter {
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color32, font_size: f32) {
        self.text(
            rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(font_size),
            color,
        );
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.line_segment([from, to], Stroke::new(width, color));
    }
}
