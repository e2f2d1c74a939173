//! Leveling - experience accumulation and level thresholds
//!
//! Experience comes only from cleared cells. The requirement for leaving
//! `level` grows geometrically:
//!
//! `required(level) = base * (1 + growth) ^ (level - 1)`
//!
//! With the defaults (base 50, growth 50%) that is 50, 75, 112.5, ...
//! Leftover experience carries over into the next level. At `max_level` the
//! requirement becomes infinite and further experience is discarded.

use log::info;
use serde::Serialize;

use crate::config::GameConfig;

/// Snapshot of level state for observers and renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub experience: f64,
    /// `f64::INFINITY` at max level
    pub required: f64,
}

impl LevelProgress {
    /// Fill ratio of the experience bar in [0, 1]
    pub fn fraction(&self) -> f64 {
        if !self.required.is_finite() || self.required <= 0.0 {
            return 0.0;
        }
        (self.experience / self.required).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelHandler {
    current_level: u32,
    current_experience: f64,
    required: f64,
    max_level: u32,
    base_required: f64,
    growth: f64,
    experience_per_square: u32,
    drain_increase_per_level: f64,
    max_drain_multiplier: f64,
}

impl LevelHandler {
    pub fn new(config: &GameConfig) -> Self {
        let mut handler = Self {
            current_level: 1,
            current_experience: 0.0,
            required: 0.0,
            max_level: config.max_level.max(1),
            base_required: config.base_experience_required,
            growth: config.experience_increase_percentage,
            experience_per_square: config.experience_per_square,
            drain_increase_per_level: config.health_drain_increase_per_level,
            max_drain_multiplier: config.max_health_drain_multiplier,
        };
        handler.required = handler.experience_required_for(1);
        handler
    }

    /// Experience needed to leave `level`
    pub fn experience_required_for(&self, level: u32) -> f64 {
        if level >= self.max_level {
            return f64::INFINITY;
        }
        self.base_required * (1.0 + self.growth).powi(level.saturating_sub(1) as i32)
    }

    pub fn reset(&mut self) {
        self.current_level = 1;
        self.current_experience = 0.0;
        self.required = self.experience_required_for(1);
    }

    /// Credit experience for `cleared` cells
    ///
    /// Returns `None` when already at max level (nothing changes), otherwise
    /// the number of levels gained (possibly 0).
    pub fn add_experience(&mut self, cleared: usize) -> Option<u32> {
        if self.is_max_level() {
            return None;
        }

        self.current_experience += cleared as f64 * self.experience_per_square as f64;

        let mut gained = 0;
        while self.current_experience >= self.required && !self.is_max_level() {
            self.current_experience -= self.required;
            self.current_level += 1;
            gained += 1;
            self.required = self.experience_required_for(self.current_level);
            if self.is_max_level() {
                self.current_experience = 0.0;
            }
            info!(target: "level", "reached level {}", self.current_level);
        }
        Some(gained)
    }

    pub fn is_max_level(&self) -> bool {
        self.current_level >= self.max_level
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn current_experience(&self) -> f64 {
        self.current_experience
    }

    pub fn experience_required_for_next_level(&self) -> f64 {
        self.required
    }

    pub fn progress(&self) -> LevelProgress {
        LevelProgress {
            level: self.current_level,
            experience: self.current_experience,
            required: self.required,
        }
    }

    /// Drain speed factor for the current level, capped
    pub fn health_drain_multiplier(&self) -> f64 {
        let raw = 1.0 + (self.current_level - 1) as f64 * self.drain_increase_per_level;
        raw.min(self.max_drain_multiplier)
    }
}
