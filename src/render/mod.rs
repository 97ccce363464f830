//! Grid Presentation Layer
//!
//! Draws the 9x9 outline and the scanned digits. Drawing goes through the
//! [`Surface`] trait so the same renderer serves the egui dashboard and
//! tests.

pub mod painter;

use egui::{Color32, Pos2, Rect};

use crate::config::GridSettings;
use crate::grid::{GridData, GridEntry, GridGeometry, LineWeight, COLUMNS, ROWS};

/// Anything the grid can be drawn onto
pub trait Surface {
    /// Draw `text` centered in `rect`
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color32, font_size: f32);

    /// Stroke a straight line
    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
}

/// Colors and stroke widths used by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub minor_line_width: f32,
    pub major_line_width: f32,
    pub font_size: f32,
    pub stroke_color: Color32,
    pub initial_color: Color32,
    pub solved_color: Color32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self::from(&GridSettings::default())
    }
}

impl From<&GridSettings> for GridStyle {
    fn from(settings: &GridSettings) -> Self {
        let rgb = |c: [u8; 3]| Color32::from_rgb(c[0], c[1], c[2]);
        Self {
            minor_line_width: settings.minor_line_width,
            major_line_width: settings.major_line_width,
            font_size: settings.font_size,
            stroke_color: rgb(settings.stroke_color),
            initial_color: rgb(settings.initial_color),
            solved_color: rgb(settings.solved_color),
        }
    }
}

impl GridStyle {
    pub fn line_width(&self, weight: LineWeight) -> f32 {
        match weight {
            LineWeight::Major => self.major_line_width,
            LineWeight::Minor => self.minor_line_width,
        }
    }
}

/// Draws grid data onto a surface
pub struct GridRenderer<'a> {
    style: &'a GridStyle,
}

impl<'a> GridRenderer<'a> {
    pub fn new(style: &'a GridStyle) -> Self {
        Self { style }
    }

    /// Draw initial digits, then solved digits, then the outline.
    ///
    /// Entries are drawn in order, so a later entry for the same cell paints
    /// over an earlier one.
    pub fn render(&self, data: &GridData, geometry: &GridGeometry, surface: &mut impl Surface) {
        self.draw_entries(data.initial(), self.style.initial_color, geometry, surface);
        self.draw_entries(data.solved(), self.style.solved_color, geometry, surface);
        self.draw_outline(geometry, surface);
    }

    fn draw_entries(
        &self,
        entries: &[GridEntry],
        color: Color32,
        geometry: &GridGeometry,
        surface: &mut impl Surface,
    ) {
        for entry in entries {
            let rect = geometry.rect_for_cell(entry.column(), entry.row());
            surface.draw_text(entry.as_str(), rect, color, self.style.font_size);
        }
    }

    fn draw_outline(&self, geometry: &GridGeometry, surface: &mut impl Surface) {
        for i in 0..=COLUMNS {
            let width = self.style.line_width(GridGeometry::line_weight(i));
            let [from, to] = geometry.vertical_line(i);
            surface.stroke_line(from, to, width, self.style.stroke_color);
        }

        for i in 0..=ROWS {
            let width = self.style.line_width(GridGeometry::line_weight(i));
            let [from, to] = geometry.horizontal_line(i);
            surface.stroke_line(from, to, width, self.style.stroke_color);
        }
    }
}
