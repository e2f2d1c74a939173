//! Scoring module
//!
//! One formula for every place that turns cleared cells into points:
//! `floor(cleared * base_multiplier * combo_multiplier)`. Both the score
//! handler and the default mode policy call [`calculate_score`].

use crate::types::GridPosition;

/// Points for clearing `cleared` cells
pub fn calculate_score(cleared: usize, base_multiplier: f64, combo_multiplier: f64) -> u64 {
    let points = cleared as f64 * base_multiplier * combo_multiplier;
    if points.is_finite() && points > 0.0 {
        points.floor() as u64
    } else {
        0
    }
}

/// Cumulative score for one session
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreHandler {
    score: u64,
    base_multiplier: f64,
}

impl ScoreHandler {
    pub fn new(base_multiplier: f64) -> Self {
        Self {
            score: 0,
            base_multiplier,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn base_multiplier(&self) -> f64 {
        self.base_multiplier
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// Add points for `cleared` cells; returns the new total
    pub fn add_score(&mut self, cleared: usize, combo_multiplier: f64) -> u64 {
        let points = calculate_score(cleared, self.base_multiplier, combo_multiplier);
        self.add_raw_score(points)
    }

    /// Add pre-computed points; returns the new total
    pub fn add_raw_score(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Points the rectangle `start..=end` would be worth without a combo
    pub fn calculate_area_score(&self, start: GridPosition, end: GridPosition) -> u64 {
        calculate_score(GridPosition::area_len(start, end), self.base_multiplier, 1.0)
    }
}
