//! Session configuration
//!
//! One immutable value per game. Every field has a default, so a JSON file
//! only needs the keys it wants to override:
//!
//! ```
//! use quares_core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "grid_size": 6, "seed": 7 }"#).unwrap();
//! assert_eq!(config.grid_size, 6);
//! assert_eq!(config.number_of_colors, 5);
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Longest combo window `validate` accepts, in seconds
pub const MAX_COMBO_THRESHOLD_SECS: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Grid
    pub grid_size: usize,
    pub number_of_colors: usize,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u32>,

    // Health
    pub initial_health_drain_duration: f64,
    pub minimum_health_drain_duration: f64,
    pub health_regeneration_percentage: f64,

    // Scoring and difficulty
    pub base_multiplier: f64,
    pub difficulty_increase_per_score: u64,
    pub drain_speed_increase_percentage: f64,

    // Combo
    pub combo_threshold: f64,
    pub combo_base_bonus_percentage: f64,
    pub combo_increment_percentage: f64,

    // Leveling
    pub max_level: u32,
    pub base_experience_required: f64,
    pub experience_increase_percentage: f64,
    pub experience_per_square: u32,
    pub health_drain_increase_per_level: f64,
    pub max_health_drain_multiplier: f64,

    /// Seconds between survival timer notifications
    pub timer_interval: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            number_of_colors: DEFAULT_NUMBER_OF_COLORS,
            seed: None,
            initial_health_drain_duration: DEFAULT_HEALTH_DRAIN_SECS,
            minimum_health_drain_duration: MIN_HEALTH_DRAIN_SECS,
            health_regeneration_percentage: DEFAULT_HEALTH_REGEN,
            base_multiplier: 1.0,
            difficulty_increase_per_score: DIFFICULTY_INCREASE_PER_SCORE,
            drain_speed_increase_percentage: DRAIN_SPEED_INCREASE,
            combo_threshold: DEFAULT_COMBO_THRESHOLD_SECS,
            combo_base_bonus_percentage: COMBO_BASE_BONUS,
            combo_increment_percentage: COMBO_INCREMENT_BONUS,
            max_level: MAX_LEVEL,
            base_experience_required: BASE_EXPERIENCE_REQUIRED,
            experience_increase_percentage: EXPERIENCE_INCREASE,
            experience_per_square: 1,
            health_drain_increase_per_level: DRAIN_INCREASE_PER_LEVEL,
            max_health_drain_multiplier: MAX_DRAIN_MULTIPLIER,
            timer_interval: SURVIVAL_TIMER_INTERVAL_SECS,
        }
    }
}

impl GameConfig {
    /// Total number of cells
    pub fn grid_area(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the rules cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            bail!("grid_size must be at least 1");
        }
        if self.grid_size > i32::MAX as usize {
            bail!("grid_size {} is too large", self.grid_size);
        }
        if !(1..=u8::MAX as usize + 1).contains(&self.number_of_colors) {
            bail!(
                "number_of_colors must be between 1 and 256, got {}",
                self.number_of_colors
            );
        }
        positive("initial_health_drain_duration", self.initial_health_drain_duration)?;
        positive("minimum_health_drain_duration", self.minimum_health_drain_duration)?;
        if self.minimum_health_drain_duration > self.initial_health_drain_duration {
            bail!(
                "minimum_health_drain_duration ({}) exceeds initial_health_drain_duration ({})",
                self.minimum_health_drain_duration,
                self.initial_health_drain_duration
            );
        }
        unit("health_regeneration_percentage", self.health_regeneration_percentage)?;
        non_negative("base_multiplier", self.base_multiplier)?;
        if self.difficulty_increase_per_score == 0 {
            bail!("difficulty_increase_per_score must be at least 1");
        }
        non_negative("drain_speed_increase_percentage", self.drain_speed_increase_percentage)?;
        non_negative("combo_threshold", self.combo_threshold)?;
        if self.combo_threshold > MAX_COMBO_THRESHOLD_SECS {
            bail!(
                "combo_threshold must be at most {} seconds, got {}",
                MAX_COMBO_THRESHOLD_SECS,
                self.combo_threshold
            );
        }
        non_negative("combo_base_bonus_percentage", self.combo_base_bonus_percentage)?;
        non_negative("combo_increment_percentage", self.combo_increment_percentage)?;
        if self.max_level == 0 {
            bail!("max_level must be at least 1");
        }
        positive("base_experience_required", self.base_experience_required)?;
        non_negative("experience_increase_percentage", self.experience_increase_percentage)?;
        non_negative("health_drain_increase_per_level", self.health_drain_increase_per_level)?;
        if !self.max_health_drain_multiplier.is_finite() || self.max_health_drain_multiplier < 1.0 {
            bail!(
                "max_health_drain_multiplier must be a finite value >= 1, got {}",
                self.max_health_drain_multiplier
            );
        }
        positive("timer_interval", self.timer_interval)?;
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(s).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in config {}", path.display()))
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{} must be a finite value > 0, got {}", name, value);
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("{} must be a finite value >= 0, got {}", name, value);
    }
    Ok(())
}

fn unit(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        bail!("{} must be within [0, 1], got {}", name, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_area(), 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_combo_threshold_upper_bound() {
        assert!(GameConfig::from_json_str(r#"{ "combo_threshold": 1e30, "seed": 1 }"#).is_err());
        assert!(GameConfig::from_json_str(r#"{ "combo_threshold": 3600.0 }"#).is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json_str(r#"{"number_of_colors": 3, "combo_threshold": 1.5}"#)
                .unwrap();
        assert_eq!(config.number_of_colors, 3);
        assert_eq!(config.combo_threshold, 1.5);
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(config.max_level, MAX_LEVEL);
    }

    #[test]
    fn test_rejects_zero_grid() {
        let err = GameConfig::from_json_str(r#"{"grid_size": 0}"#).unwrap_err();
        assert!(err.to_string().contains("grid_size"));
    }

    #[test]
    fn test_rejects_minimum_above_initial() {
        let config = GameConfig {
            minimum_health_drain_duration: 40.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_regen_out_of_range() {
        let config = GameConfig {
            health_regeneration_percentage: 1.5,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(GameConfig::from_json_str("{ grid_size: ").is_err());
    }

    #[test]
    fn test_with_seed() {
        assert_eq!(GameConfig::default().with_seed(9).seed, Some(9));
    }
}
