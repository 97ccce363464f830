//! On-screen grid geometry
//!
//! Fits a centered square into a drawable rectangle and slices it into
//! 9x9 cells. Shared by the renderer and by anything that needs to hit-test
//! cells.

use egui::{vec2, Pos2, Rect};

use super::{COLUMNS, ROWS, SEPARATION};

/// Stroke class of a grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWeight {
    /// Outer border and 3x3 block separators
    Major,
    /// Lines between cells inside a block
    Minor,
}

/// Square grid region inside a drawable area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    origin: Pos2,
    side: f32,
}

impl GridGeometry {
    /// Fit the grid into `bounds`, inset by `inset` so border strokes are not
    /// clipped at the edges.
    pub fn new(bounds: Rect, inset: f32) -> Self {
        let width = bounds.width() - inset;
        let height = bounds.height() - inset;
        let side = width.min(height).max(0.0);

        let center = vec2(width / 2.0, height / 2.0);
        let origin = bounds.min + center - vec2(side / 2.0, side / 2.0) + vec2(inset / 2.0, inset / 2.0);

        Self { origin, side }
    }

    /// The full square region
    pub fn square(&self) -> Rect {
        Rect::from_min_size(self.origin, vec2(self.side, self.side))
    }

    pub fn cell_width(&self) -> f32 {
        self.side / COLUMNS as f32
    }

    pub fn cell_height(&self) -> f32 {
        self.side / ROWS as f32
    }

    /// Rectangle of one cell
    pub fn rect_for_cell(&self, column: usize, row: usize) -> Rect {
        let min = self.origin
            + vec2(
                column as f32 * self.cell_width(),
                row as f32 * self.cell_height(),
            );
        Rect::from_min_size(min, vec2(self.cell_width(), self.cell_height()))
    }

    /// Stroke class for boundary line `index` (0..=9) on either axis
    pub fn line_weight(index: usize) -> LineWeight {
        if index == 0 || index % SEPARATION == 0 {
            LineWeight::Major
        } else {
            LineWeight::Minor
        }
    }

    /// Endpoints of vertical boundary line `index`
    pub fn vertical_line(&self, index: usize) -> [Pos2; 2] {
        let x = self.origin.x + index as f32 * self.cell_width();
        [
            Pos2::new(x, self.origin.y),
            Pos2::new(x, self.origin.y + self.side),
        ]
    }

    /// Endpoints of horizontal boundary line `index`
    pub fn horizontal_line(&self, index: usize) -> [Pos2; 2] {
        let y = self.origin.y + index as f32 * self.cell_height();
        [
            Pos2::new(self.origin.x, y),
            Pos2::new(self.origin.x + self.side, y),
        ]
    }

    /// Cell under a point, if any
    pub fn cell_at(&self, pos: Pos2) -> Option<(usize, usize)> {
        if self.side <= 0.0 || !self.square().contains(pos) {
            return None;
        }
        let column = ((pos.x - self.origin.x) / self.cell_width()) as usize;
        let row = ((pos.y - self.origin.y) / self.cell_height()) as usize;
        Some((column.min(COLUMNS - 1), row.min(ROWS - 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn geometry() -> GridGeometry {
        GridGeometry::new(Rect::from_min_size(Pos2::new(10.0, 20.0), vec2(400.0, 300.0)), 1.5)
    }

    #[test]
    fn test_square_is_centered_and_inset() {
        let g = geometry();
        // height - inset is the limiting side
        assert!((g.square().width() - 298.5).abs() < EPS);
        // x: 10 + 199.25 - 149.25 + 0.75
        assert!((g.square().min.x - 60.75).abs() < EPS);
        // y: 20 + 149.25 - 149.25 + 0.75
        assert!((g.square().min.y - 20.75).abs() < EPS);
        assert!((g.cell_width() - g.square().width() / 9.0).abs() < EPS);
        assert!((g.cell_height() - g.square().width() / 9.0).abs() < EPS);
    }

    #[test]
    fn test_degenerate_bounds_give_empty_square() {
        let g = GridGeometry::new(Rect::from_min_size(Pos2::ZERO, vec2(1.0, 1.0)), 1.5);
        assert_eq!(g.square().width(), 0.0);
        assert!(g.cell_at(Pos2::ZERO).is_none());
    }

    #[test]
    fn test_cells_tile_the_square() {
        let g = geometry();
        let square = g.square();

        let mut area = 0.0;
        for column in 0..9 {
            for row in 0..9 {
                let rect = g.rect_for_cell(column, row);
                area += rect.area();

                assert!(rect.min.x >= square.min.x - EPS && rect.max.x <= square.max.x + EPS);
                assert!(rect.min.y >= square.min.y - EPS && rect.max.y <= square.max.y + EPS);

                if column < 8 {
                    let right = g.rect_for_cell(column + 1, row);
                    assert!((rect.max.x - right.min.x).abs() < EPS);
                }
                if row < 8 {
                    let below = g.rect_for_cell(column, row + 1);
                    assert!((rect.max.y - below.min.y).abs() < EPS);
                }
            }
        }

        assert!((area - square.area()).abs() < 0.5);
        assert!((g.rect_for_cell(0, 0).min - square.min).length() < EPS);
        assert!((g.rect_for_cell(8, 8).max - square.max).length() < EPS);
    }

    #[test]
    fn test_cell_interiors_are_disjoint() {
        let g = geometry();
        let cells: Vec<Rect> = (0..81).map(|i| g.rect_for_cell(i % 9, i / 9)).collect();

        for (i, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(i + 1) {
                let overlap = a.intersect(*b);
                let area = overlap.width().max(0.0) * overlap.height().max(0.0);
                assert!(area < EPS, "cells {:?} and {:?} overlap", a, b);
            }
        }
    }

    #[test]
    fn test_line_weight_every_third_line() {
        for i in 0..=9 {
            let expected = if i % 3 == 0 { LineWeight::Major } else { LineWeight::Minor };
            assert_eq!(GridGeometry::line_weight(i), expected, "line {}", i);
        }
    }

    #[test]
    fn test_lines_span_the_square() {
        let g = geometry();
        let square = g.square();

        let [top, bottom] = g.vertical_line(9);
        assert!((top.x - square.max.x).abs() < EPS);
        assert!((top.y - square.min.y).abs() < EPS);
        assert!((bottom.y - square.max.y).abs() < EPS);

        let [left, right] = g.horizontal_line(3);
        assert!((left.y - g.rect_for_cell(0, 3).min.y).abs() < EPS);
        assert!((right.x - square.max.x).abs() < EPS);
    }

    #[test]
    fn test_cell_at_point() {
        let g = geometry();
        let center = g.rect_for_cell(5, 2).center();
        assert_eq!(g.cell_at(center), Some((5, 2)));
        assert_eq!(g.cell_at(g.square().max), Some((8, 8)));
        assert_eq!(g.cell_at(Pos2::new(0.0, 0.0)), None);
    }
}
