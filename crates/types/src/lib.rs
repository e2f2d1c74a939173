//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain values with no behavior beyond geometry helpers, so they
//! can be used anywhere (rules engine, bot, renderers, snapshots).
//!
//! # Grid Coordinates
//!
//! - `x` grows left to right, `y` grows top to bottom, both 0-indexed
//! - The grid is square: `grid_size x grid_size` (default 10)
//! - Coordinates are signed so that callers can express off-grid taps; the
//!   engine rejects them with a bounds check before any indexing happens
//!
//! # Default Tuning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 10 | Cells per side |
//! | `DEFAULT_NUMBER_OF_COLORS` | 5 | Distinct color indices |
//! | `DEFAULT_HEALTH_DRAIN_SECS` | 30.0 | Full drain time at difficulty 0 |
//! | `MIN_HEALTH_DRAIN_SECS` | 2.0 | Drain time floor |
//! | `DEFAULT_HEALTH_REGEN` | 0.15 | Base regen per match |
//! | `DEFAULT_COMBO_THRESHOLD_SECS` | 3.0 | Combo window |
//! | `SURVIVAL_DRAIN_SECS` | 3.0 | Survival mode fixed drain |
//! | `SURVIVAL_REGEN` | 0.8 | Survival mode fixed regen |
//!
//! # Examples
//!
//! ```
//! use quares_types::{GameMode, GridPosition};
//!
//! let a = GridPosition::new(3, 3);
//! let b = GridPosition::new(1, 1);
//!
//! // Area is the inclusive bounding box, independent of drag direction
//! assert_eq!(GridPosition::area(a, b).len(), 9);
//! assert_eq!(GridPosition::corners(a, b)[0], GridPosition::new(1, 1));
//!
//! assert_eq!(GameMode::from_str("survival"), Some(GameMode::Survival));
//! ```

use serde::{Deserialize, Serialize};

/// Default grid side length (10 cells)
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Default number of distinct colors (5)
pub const DEFAULT_NUMBER_OF_COLORS: usize = 5;

/// Seconds for a full health bar to drain at difficulty 0
pub const DEFAULT_HEALTH_DRAIN_SECS: f64 = 30.0;

/// Drain duration never goes below this many seconds
pub const MIN_HEALTH_DRAIN_SECS: f64 = 2.0;

/// Base health regenerated by any successful match
pub const DEFAULT_HEALTH_REGEN: f64 = 0.15;

/// Score points per difficulty step in Classic mode
pub const DIFFICULTY_INCREASE_PER_SCORE: u64 = 100;

/// Drain speed-up per difficulty step (10%)
pub const DRAIN_SPEED_INCREASE: f64 = 0.1;

/// Seconds between two matches for them to count as a combo
pub const DEFAULT_COMBO_THRESHOLD_SECS: f64 = 3.0;

/// Bonus granted by the first extra hit of a combo (10%)
pub const COMBO_BASE_BONUS: f64 = 0.10;

/// Bonus added by every further hit of a combo (5%)
pub const COMBO_INCREMENT_BONUS: f64 = 0.05;

/// Survival mode: fixed drain duration in seconds
pub const SURVIVAL_DRAIN_SECS: f64 = 3.0;

/// Survival mode: fixed regen per match
pub const SURVIVAL_REGEN: f64 = 0.8;

/// Survival timer notification period in seconds
pub const SURVIVAL_TIMER_INTERVAL_SECS: f64 = 0.1;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 100;

/// Experience needed to go from level 1 to level 2
pub const BASE_EXPERIENCE_REQUIRED: f64 = 50.0;

/// Geometric growth of the experience requirement per level (50%)
pub const EXPERIENCE_INCREASE: f64 = 0.5;

/// Drain speed-up per level above 1 (5%)
pub const DRAIN_INCREASE_PER_LEVEL: f64 = 0.05;

/// Cap on the level drain multiplier
pub const MAX_DRAIN_MULTIPLIER: f64 = 3.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_values() {
        assert_eq!(DEFAULT_GRID_SIZE, 10);
        assert_eq!(DEFAULT_NUMBER_OF_COLORS, 5);
        assert_eq!(DEFAULT_HEALTH_DRAIN_SECS, 30.0);
        assert_eq!(MIN_HEALTH_DRAIN_SECS, 2.0);
        assert_eq!(DEFAULT_HEALTH_REGEN, 0.15);
        assert_eq!(DIFFICULTY_INCREASE_PER_SCORE, 100);
        assert_eq!(DRAIN_SPEED_INCREASE, 0.1);
        assert_eq!(SURVIVAL_DRAIN_SECS, 3.0);
        assert_eq!(SURVIVAL_REGEN, 0.8);
    }

    #[test]
    fn area_is_symmetric() {
        let a = GridPosition::new(1, 4);
        let b = GridPosition::new(3, 0);
        let mut ab = GridPosition::area(a, b);
        let mut ba = GridPosition::area(b, a);
        ab.sort_by_key(|p| (p.x, p.y));
        ba.sort_by_key(|p| (p.x, p.y));
        assert_eq!(ab, ba);
        assert_eq!(ab.len(), 3 * 5);
    }

    #[test]
    fn area_len_saturates_on_extreme_positions() {
        let a = GridPosition::new(-2, 0);
        let b = GridPosition::new(i32::MAX, 0);
        assert_eq!(GridPosition::area_len(a, b), i32::MAX as usize + 3);

        let min = GridPosition::new(i32::MIN, i32::MIN);
        let max = GridPosition::new(i32::MAX, i32::MAX);
        assert!(GridPosition::area_len(min, max) >= u32::MAX as usize);
    }

    #[test]
    fn corners_of_single_cell_coincide() {
        let p = GridPosition::new(2, 2);
        assert_eq!(GridPosition::corners(p, p), [p; 4]);
    }

    #[test]
    fn corners_of_a_line_duplicate() {
        let corners = GridPosition::corners(GridPosition::new(0, 5), GridPosition::new(4, 5));
        assert_eq!(corners[0], corners[2]);
        assert_eq!(corners[1], corners[3]);
    }

    #[test]
    fn game_mode_round_trips_through_str() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(GameMode::from_str("arcade"), None);
    }
}

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Every position of the inclusive rectangle spanned by `start` and `end`
    ///
    /// The result has `(|dx| + 1) * (|dy| + 1)` elements in column-major order,
    /// whichever corner was given first.
    pub fn area(start: GridPosition, end: GridPosition) -> Vec<GridPosition> {
        let (min_x, max_x) = (start.x.min(end.x), start.x.max(end.x));
        let (min_y, max_y) = (start.y.min(end.y), start.y.max(end.y));

        let width = max_x.abs_diff(min_x) as usize + 1;
        let height = max_y.abs_diff(min_y) as usize + 1;
        let mut positions = Vec::with_capacity(width.saturating_mul(height));
        for x in min_x..=max_x {
            for y in min_y..=max_y {
                positions.push(GridPosition::new(x, y));
            }
        }
        positions
    }

    /// The four corners of the rectangle spanned by `start` and `end`
    ///
    /// Order: top-left, top-right, bottom-left, bottom-right. Corners repeat
    /// when both points share a row or a column.
    pub fn corners(start: GridPosition, end: GridPosition) -> [GridPosition; 4] {
        let (min_x, max_x) = (start.x.min(end.x), start.x.max(end.x));
        let (min_y, max_y) = (start.y.min(end.y), start.y.max(end.y));

        [
            GridPosition::new(min_x, min_y),
            GridPosition::new(max_x, min_y),
            GridPosition::new(min_x, max_y),
            GridPosition::new(max_x, max_y),
        ]
    }

    /// Number of cells in the rectangle spanned by `start` and `end`
    ///
    /// Saturates at `usize::MAX` instead of overflowing.
    pub fn area_len(start: GridPosition, end: GridPosition) -> usize {
        let width = (start.x.abs_diff(end.x) as usize).saturating_add(1);
        let height = (start.y.abs_diff(end.y) as usize).saturating_add(1);
        width.saturating_mul(height)
    }
}

impl From<(i32, i32)> for GridPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A single grid cell
///
/// `is_empty` is reserved for "no match possible" states and is never set by
/// the current rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Square {
    pub color_index: u8,
    pub is_empty: bool,
}

impl Square {
    pub const fn new(color_index: u8) -> Self {
        Self {
            color_index,
            is_empty: false,
        }
    }
}

/// Rule set selected for one session
///
/// - **Classic**: health, score, levels; drain speeds up with score and level
/// - **Survival**: fixed fast drain, boosted regen, survival clock, no score
/// - **Training**: no drain, no regen, no score, never ends on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Training,
    #[default]
    Classic,
    Survival,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Training, GameMode::Classic, GameMode::Survival];

    /// Parse a mode name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use quares_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_str("Classic"), Some(GameMode::Classic));
    /// assert_eq!(GameMode::from_str("TRAINING"), Some(GameMode::Training));
    /// assert_eq!(GameMode::from_str("zen"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "training" => Some(GameMode::Training),
            "classic" => Some(GameMode::Classic),
            "survival" => Some(GameMode::Survival),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Training => "training",
            GameMode::Classic => "classic",
            GameMode::Survival => "survival",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Training => "Training",
            GameMode::Classic => "Classic",
            GameMode::Survival => "Survival",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::Training => "Practice without health or score",
            GameMode::Classic => "Play through levels with increasing difficulty",
            GameMode::Survival => "Survive as long as you can against time",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
