//! Sudoku grid model
//!
//! Validated digit placements and the immutable scan result handed from
//! the recognition worker to the renderer.

pub mod geometry;
pub mod partition;

pub use geometry::{GridGeometry, LineWeight};
pub use partition::AxisPartition;

use serde::{Deserialize, Serialize};

/// Number of rows in the grid
pub const ROWS: usize = 9;
/// Number of columns in the grid
pub const COLUMNS: usize = 9;
/// Cells per 3x3 block side; every `SEPARATION`-th line is drawn bold
pub const SEPARATION: usize = 3;

const DIGITS: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A recognized digit placed on the grid
///
/// Always valid by construction: the digit is 1-9 and both indices are 0-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawGridEntry")]
pub struct GridEntry {
    digit: u8,
    column: u8,
    row: u8,
}

impl GridEntry {
    /// Create an entry from a recognized string.
    ///
    /// Anything other than a single digit 1-9 is clamped to "1". Indices past
    /// the last row or column are clamped to 8.
    pub fn new(value: &str, column: usize, row: usize) -> Self {
        let digit = match value.as_bytes() {
            [b @ b'1'..=b'9'] => b - b'0',
            _ => 1,
        };

        Self::clamped(digit, column, row)
    }

    fn clamped(digit: u8, column: usize, row: usize) -> Self {
        Self {
            digit: if (1..=9).contains(&digit) { digit } else { 1 },
            column: column.min(COLUMNS - 1) as u8,
            row: row.min(ROWS - 1) as u8,
        }
    }

    /// The digit as a character
    pub fn value(&self) -> char {
        (b'0' + self.digit) as char
    }

    /// The digit as a static string, for drawing
    pub fn as_str(&self) -> &'static str {
        DIGITS[(self.digit - 1) as usize]
    }

    pub fn column(&self) -> usize {
        self.column as usize
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }
}

/// Serialized form of [`GridEntry`], clamped on the way in
#[derive(Deserialize)]
struct RawGridEntry {
    digit: u8,
    column: usize,
    row: usize,
}

impl From<RawGridEntry> for GridEntry {
    fn from(raw: RawGridEntry) -> Self {
        Self::clamped(raw.digit, raw.column, raw.row)
    }
}

/// Result of one scan, handed by value to the renderer
///
/// A new scan produces a new `GridData` that replaces the previous one
/// wholesale; nothing is updated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridData {
    initial: Vec<GridEntry>,
    solved: Vec<GridEntry>,
}

impl GridData {
    /// Grid data for freshly scanned entries. Solved entries stay empty.
    pub fn scanned(entries: Vec<GridEntry>) -> Self {
        Self {
            initial: entries,
            solved: Vec::new(),
        }
    }

    /// Entries recognized from the photo, in observation order
    pub fn initial(&self) -> &[GridEntry] {
        &self.initial
    }

    /// Entries produced by a solver (reserved, always empty)
    pub fn solved(&self) -> &[GridEntry] {
        &self.solved
    }

    pub fn len(&self) -> usize {
        self.initial.len() + self.solved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initial.is_empty() && self.solved.is_empty()
    }

    /// Entry shown at a cell. Duplicates resolve to the last one written.
    pub fn cell(&self, column: usize, row: usize) -> Option<&GridEntry> {
        self.initial
            .iter()
            .chain(self.solved.iter())
            .filter(|e| e.column() == column && e.row() == row)
            .last()
    }

    /// Plain-text rendering, one line per row
    pub fn to_text_grid(&self) -> String {
        let mut out = String::new();

        for row in 0..ROWS {
            if row > 0 && row % SEPARATION == 0 {
                out.push_str("------+-------+------\n");
            }

            let mut line = String::new();
            for column in 0..COLUMNS {
                if column > 0 && column % SEPARATION == 0 {
                    line.push_str("| ");
                }
                let ch = self.cell(column, row).map(|e| e.value()).unwrap_or('.');
                line.push(ch);
                line.push(' ');
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}
