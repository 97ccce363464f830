//! Recognition-to-grid mapping
//!
//! Turns raw observations into validated grid entries. Pure: no state is
//! kept between passes, so one mapper can be cloned into every scan request.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{BoundingBox, Observation};
use crate::grid::{AxisPartition, GridEntry, COLUMNS, ROWS};

/// How a multi-character observation is split into per-character positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Character `i` starts at `box.y + i * (box.width / trimmed_len) / untrimmed_len`.
    ///
    /// Uses the box's y-origin on the x axis and mixes trimmed and untrimmed
    /// lengths. Kept as the default so existing scans map the same way.
    #[default]
    Legacy,
    /// Character `i` is centred at `box.x + (i + 0.5) * box.width / trimmed_len`
    Proportional,
}

/// Mapper tuning
#[derive(Debug, Clone, PartialEq)]
pub struct MapperConfig {
    /// Top-ranked candidates (the top one included) inspected for an ambiguous "1"
    pub alternate_count: usize,
    /// A "1" is confirmed when more than this many of them read "1"
    pub one_confirmation_threshold: usize,
    /// Drop a "1" that fails confirmation instead of keeping it
    pub require_one_confirmation: bool,
    /// Multi-character split strategy
    pub split_mode: SplitMode,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            alternate_count: 9,
            one_confirmation_threshold: 5,
            require_one_confirmation: false,
            split_mode: SplitMode::Legacy,
        }
    }
}

/// Maps recognition observations onto grid cells
#[derive(Debug, Clone)]
pub struct RecognitionMapper {
    config: MapperConfig,
    columns: AxisPartition,
    /// Reversed: observation y grows upwards, grid rows grow downwards
    rows: AxisPartition,
}

impl Default for RecognitionMapper {
    fn default() -> Self {
        Self::new(MapperConfig::default())
    }
}

impl RecognitionMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            columns: AxisPartition::new(COLUMNS, false),
            rows: AxisPartition::new(ROWS, true),
        }
    }

    /// Map every observation, in order. Observations that land outside the
    /// grid are dropped silently; duplicates for one cell are all kept.
    pub fn map(&self, observations: &[Observation]) -> Vec<GridEntry> {
        let mut entries = Vec::with_capacity(observations.len());

        for observation in observations {
            self.map_observation(observation, &mut entries);
        }

        debug!(
            "Mapped {} observations to {} grid entries",
            observations.len(),
            entries.len()
        );

        entries
    }

    fn map_observation(&self, observation: &Observation, entries: &mut Vec<GridEntry>) {
        let Some(text) = observation.top() else {
            trace!("Observation without candidates skipped");
            return;
        };

        if text == "1" && !self.confirm_one(observation) {
            if self.config.require_one_confirmation {
                trace!("Unconfirmed \"1\" dropped at {:?}", observation.bounds);
                return;
            }
            trace!("Unconfirmed \"1\" kept at {:?}", observation.bounds);
        }

        let length = text.chars().count();
        if length <= 1 {
            let (cx, cy) = observation.bounds.center();
            if let Some(entry) = self.place(text, cx, cy) {
                entries.push(entry);
            }
        } else {
            self.split_run(text, length, &observation.bounds, entries);
        }
    }

    /// Whether enough of the top candidates agree that an ambiguous glyph is
    /// a "1". The top candidate itself casts the first vote.
    fn confirm_one(&self, observation: &Observation) -> bool {
        let votes = observation
            .top_candidates(self.config.alternate_count)
            .iter()
            .filter(|c| c.as_str() == "1")
            .count();

        votes > self.config.one_confirmation_threshold
    }

    /// Split a run of merged glyphs into one entry per character
    fn split_run(
        &self,
        text: &str,
        untrimmed_len: usize,
        bounds: &BoundingBox,
        entries: &mut Vec<GridEntry>,
    ) {
        let trimmed = text.trim();
        let trimmed_len = trimmed.chars().count();
        if trimmed_len == 0 {
            return;
        }

        let char_width = bounds.width / trimmed_len as f32;
        let (_, cy) = bounds.center();

        for (i, ch) in trimmed.chars().enumerate() {
            let x = match self.config.split_mode {
                SplitMode::Legacy => bounds.y + i as f32 * (char_width / untrimmed_len as f32),
                SplitMode::Proportional => bounds.x + (i as f32 + 0.5) * char_width,
            };

            let mut buf = [0u8; 4];
            if let Some(entry) = self.place(ch.encode_utf8(&mut buf), x, cy) {
                entries.push(entry);
            }
        }
    }

    fn place(&self, value: &str, x: f32, y: f32) -> Option<GridEntry> {
        let Some(column) = self.columns.lookup(x) else {
            trace!("x = {} outside the grid, {:?} dropped", x, value);
            return None;
        };
        let Some(row) = self.rows.lookup(y) else {
            trace!("y = {} outside the grid, {:?} dropped", y, value);
            return None;
        };

        Some(GridEntry::new(value, column, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(candidates: &[&str], bounds: BoundingBox) -> Observation {
        Observation::new(candidates.iter().map(|c| c.to_string()).collect(), bounds)
    }

    /// Box of the given size centered on (cx, cy)
    fn centered(cx: f32, cy: f32, width: f32, height: f32) -> BoundingBox {
        BoundingBox::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    fn positions(entries: &[GridEntry]) -> Vec<(char, usize, usize)> {
        entries.iter().map(|e| (e.value(), e.column(), e.row())).collect()
    }

    #[test]
    fn test_single_digit_top_left() {
        let mapper = RecognitionMapper::default();
        let obs = observation(&["5"], centered(0.05, 0.95, 0.04, 0.04));

        let entries = mapper.map(&[obs]);
        assert_eq!(positions(&entries), vec![('5', 0, 0)]);
    }

    #[test]
    fn test_single_digit_bottom_right() {
        let mapper = RecognitionMapper::default();
        let obs = observation(&["9"], centered(0.95, 0.05, 0.04, 0.04));

        assert_eq!(positions(&mapper.map(&[obs])), vec![('9', 8, 8)]);
    }

    #[test]
    fn test_confirmed_one() {
        let mapper = RecognitionMapper::default();
        let obs = observation(
            &["1", "1", "1", "1", "1", "1", "1", "7", "l", "I"],
            centered(0.5, 0.5, 0.05, 0.05),
        );

        assert!(mapper.confirm_one(&obs));
        assert_eq!(positions(&mapper.map(&[obs])), vec![('1', 4, 4)]);
    }

    #[test]
    fn test_unconfirmed_one_is_kept_by_default() {
        let mapper = RecognitionMapper::default();
        let obs = observation(&["1", "7", "1"], centered(0.5, 0.5, 0.05, 0.05));

        assert!(!mapper.confirm_one(&obs));
        assert_eq!(positions(&mapper.map(&[obs])), vec![('1', 4, 4)]);
    }

    #[test]
    fn test_unconfirmed_one_dropped_when_required() {
        let mapper = RecognitionMapper::new(MapperConfig {
            require_one_confirmation: true,
            ..Default::default()
        });
        let weak = observation(&["1", "7", "1"], centered(0.5, 0.5, 0.05, 0.05));
        let strong = observation(&["1"; 10], centered(0.15, 0.5, 0.05, 0.05));

        assert_eq!(positions(&mapper.map(&[weak, strong])), vec![('1', 1, 4)]);
    }

    #[test]
    fn test_top_candidate_counts_toward_confirmation() {
        let mapper = RecognitionMapper::new(MapperConfig {
            require_one_confirmation: true,
            ..Default::default()
        });
        // Top "1" plus five more among ranks 2-9 is six votes
        let obs = observation(
            &["1", "7", "1", "1", "7", "1", "1", "7", "1"],
            centered(0.5, 0.5, 0.05, 0.05),
        );

        assert!(mapper.confirm_one(&obs));
        assert_eq!(positions(&mapper.map(&[obs])), vec![('1', 4, 4)]);
    }

    #[test]
    fn test_only_top_nine_candidates_vote() {
        let mapper = RecognitionMapper::default();
        // Five "1" votes within the top nine, a sixth beyond them
        let obs = observation(
            &["1", "1", "1", "1", "1", "7", "7", "7", "7", "1"],
            centered(0.5, 0.5, 0.05, 0.05),
        );
        assert!(!mapper.confirm_one(&obs));
    }

    #[test]
    fn test_multi_character_run_legacy() {
        let mapper = RecognitionMapper::default();
        // x-origin 0.4, width 0.2, vertical center 0.5
        let obs = observation(&["37"], BoundingBox::new(0.4, 0.4, 0.2, 0.2));

        let entries = mapper.map(&[obs]);
        assert_eq!(positions(&entries), vec![('3', 3, 4), ('7', 4, 4)]);
    }

    #[test]
    fn test_multi_character_run_proportional() {
        let mapper = RecognitionMapper::new(MapperConfig {
            split_mode: SplitMode::Proportional,
            ..Default::default()
        });
        // Character centres at 0.40 and 0.50
        let obs = observation(&["37"], BoundingBox::new(0.35, 0.4, 0.2, 0.2));
        assert_eq!(positions(&mapper.map(&[obs])), vec![('3', 3, 4), ('7', 4, 4)]);

        // A run whose left edge sits on a column boundary stays inside it
        let edge = observation(&["12"], BoundingBox::new(2.0 / 9.0, 0.4, 2.0 / 9.0, 0.2));
        assert_eq!(positions(&mapper.map(&[edge])), vec![('1', 2, 4), ('2', 3, 4)]);
    }

    #[test]
    fn test_legacy_split_uses_vertical_origin() {
        let mapper = RecognitionMapper::default();
        // Box sits at the left edge but high in the image: legacy places the
        // run by its y-origin.
        let obs = observation(&["456"], BoundingBox::new(0.0, 0.7, 0.3, 0.1));

        let entries = mapper.map(&[obs]);
        let columns: Vec<usize> = entries.iter().map(|e| e.column()).collect();
        // 0.7, 0.7 + 0.1/3, 0.7 + 0.2/3
        assert_eq!(columns, vec![6, 6, 6]);
        assert!(entries.iter().all(|e| e.row() == 2));
    }

    #[test]
    fn test_padded_run_trims_whitespace() {
        let mapper = RecognitionMapper::new(MapperConfig {
            split_mode: SplitMode::Proportional,
            ..Default::default()
        });
        let obs = observation(&[" 8 "], BoundingBox::new(0.0, 0.0, 0.1, 0.1));

        assert_eq!(positions(&mapper.map(&[obs])), vec![('8', 0, 8)]);
    }

    #[test]
    fn test_whitespace_only_run_produces_nothing() {
        let mapper = RecognitionMapper::default();
        let obs = observation(&["   "], BoundingBox::new(0.0, 0.0, 0.1, 0.1));
        assert!(mapper.map(&[obs]).is_empty());
    }

    #[test]
    fn test_out_of_range_center_is_dropped() {
        let mapper = RecognitionMapper::default();
        let obs = observation(&["6"], centered(1.5, 0.5, 0.1, 0.1));
        let below = observation(&["6"], centered(0.5, -0.5, 0.1, 0.1));

        assert!(mapper.map(&[obs, below]).is_empty());
    }

    #[test]
    fn test_non_digit_clamps_to_one() {
        let mapper = RecognitionMapper::default();
        let obs = observation(&["a"], centered(0.5, 0.5, 0.05, 0.05));
        assert_eq!(positions(&mapper.map(&[obs])), vec![('1', 4, 4)]);
    }

    #[test]
    fn test_observation_without_candidates_is_skipped() {
        let mapper = RecognitionMapper::default();
        let obs = observation(&[], centered(0.5, 0.5, 0.05, 0.05));
        assert!(mapper.map(&[obs]).is_empty());
    }

    #[test]
    fn test_duplicates_keep_observation_order() {
        let mapper = RecognitionMapper::default();
        let first = observation(&["2"], centered(0.5, 0.5, 0.05, 0.05));
        let second = observation(&["8"], centered(0.52, 0.48, 0.05, 0.05));

        assert_eq!(
            positions(&mapper.map(&[first, second])),
            vec![('2', 4, 4), ('8', 4, 4)]
        );
    }
}
