//! Game-mode policies
//!
//! A [`ModeLogic`] is chosen once per session and decides every number the
//! engine cannot decide on its own: how fast health drains, how much a match
//! heals, what a match is worth, when the game ends, and what the end screen
//! says.
//!
//! | Mode | Drain | Regen | Score | Levels | Timer |
//! |------|-------|-------|-------|--------|-------|
//! | Classic | 30s, faster with score and level | 15% + share of grid | yes | yes | no |
//! | Survival | fixed 3s | fixed 80% | no | no | yes |
//! | Training | none | none | no | no | no |

use log::debug;
use serde::Serialize;

use crate::config::GameConfig;
use crate::level::{LevelHandler, LevelProgress};
use crate::observer::GameObserver;
use crate::scoring::calculate_score;
use crate::types::{GameMode, SURVIVAL_DRAIN_SECS, SURVIVAL_REGEN};

/// End-of-game display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOverSummary {
    pub primary: String,
    pub secondary: Option<String>,
}

/// Session totals handed to [`ModeLogic::on_game_over`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStats {
    pub score: u64,
}

pub trait ModeLogic: std::fmt::Debug {
    fn mode(&self) -> GameMode;

    fn shows_health_bar(&self) -> bool;
    fn shows_score(&self) -> bool;
    fn shows_level(&self) -> bool;
    fn shows_timer(&self) -> bool;

    /// Seconds for a full health bar to drain right now
    fn health_drain_duration(&self, base: f64, score: u64, config: &GameConfig) -> f64;

    /// Health restored by a match of `cleared` cells
    fn health_regeneration(&self, base: f64, cleared: usize, config: &GameConfig) -> f64;

    fn score(&self, cleared: usize, base_multiplier: f64, combo_multiplier: f64) -> u64 {
        calculate_score(cleared, base_multiplier, combo_multiplier)
    }

    fn is_game_over(&self, health: f64) -> bool {
        health <= 0.0
    }

    /// Called after every successful match, once score and health are settled
    fn on_match(&mut self, _cleared: usize, _observer: &mut dyn GameObserver) {}

    /// Called by `start_game` after the engine state is reset
    fn on_start(&mut self, _config: &GameConfig) {}

    /// Advance the mode's own clock while the session is running
    ///
    /// Returns the elapsed time when a timer notification is due.
    fn advance(&mut self, _delta_secs: f64) -> Option<f64> {
        None
    }

    fn on_game_over(&self, stats: SessionStats) -> GameOverSummary;

    fn level_progress(&self) -> Option<LevelProgress> {
        None
    }

    fn survival_time(&self) -> Option<f64> {
        None
    }
}

/// Build the policy for `mode`
pub fn mode_logic(mode: GameMode, config: &GameConfig) -> Box<dyn ModeLogic> {
    match mode {
        GameMode::Classic => Box::new(ClassicMode::new(config)),
        GameMode::Survival => Box::new(SurvivalMode::new(config)),
        GameMode::Training => Box::new(TrainingMode),
    }
}

/// Format seconds as `mm:ss`
pub fn format_mm_ss(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Full progression: score, levels, rising difficulty
#[derive(Debug, Clone)]
pub struct ClassicMode {
    level: LevelHandler,
}

impl ClassicMode {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level: LevelHandler::new(config),
        }
    }

    pub fn level(&self) -> &LevelHandler {
        &self.level
    }
}

impl ModeLogic for ClassicMode {
    fn mode(&self) -> GameMode {
        GameMode::Classic
    }

    fn shows_health_bar(&self) -> bool {
        true
    }
    fn shows_score(&self) -> bool {
        true
    }
    fn shows_level(&self) -> bool {
        true
    }
    fn shows_timer(&self) -> bool {
        false
    }

    /// `max(base * (1 - steps * pct) / level_multiplier, minimum)` where
    /// `steps = score / difficulty_increase_per_score`
    fn health_drain_duration(&self, base: f64, score: u64, config: &GameConfig) -> f64 {
        let steps = score / config.difficulty_increase_per_score.max(1);
        let speed_increase = steps as f64 * config.drain_speed_increase_percentage;
        let duration = base * (1.0 - speed_increase) / self.level.health_drain_multiplier();
        duration.max(config.minimum_health_drain_duration)
    }

    fn health_regeneration(&self, base: f64, cleared: usize, config: &GameConfig) -> f64 {
        let area = config.grid_area().max(1) as f64;
        base + (cleared as f64 / area) * (1.0 - base)
    }

    fn on_match(&mut self, cleared: usize, observer: &mut dyn GameObserver) {
        let from = self.level.current_level();
        if self.level.add_experience(cleared).is_none() {
            return;
        }
        for level in from + 1..=self.level.current_level() {
            observer.leveled_up(level);
        }
        observer.level_updated(self.level.progress());
    }

    fn on_start(&mut self, _config: &GameConfig) {
        self.level.reset();
    }

    fn on_game_over(&self, stats: SessionStats) -> GameOverSummary {
        GameOverSummary {
            primary: format!("Score: {}", stats.score),
            secondary: Some(format!("Level {}", self.level.current_level())),
        }
    }

    fn level_progress(&self) -> Option<LevelProgress> {
        Some(self.level.progress())
    }
}

/// Fast fixed drain, big heals, and a clock
#[derive(Debug, Clone)]
pub struct SurvivalMode {
    survival_time: f64,
    since_report: f64,
    timer_interval: f64,
}

impl SurvivalMode {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            survival_time: 0.0,
            since_report: 0.0,
            timer_interval: config.timer_interval,
        }
    }
}

impl ModeLogic for SurvivalMode {
    fn mode(&self) -> GameMode {
        GameMode::Survival
    }

    fn shows_health_bar(&self) -> bool {
        true
    }
    fn shows_score(&self) -> bool {
        false
    }
    fn shows_level(&self) -> bool {
        false
    }
    fn shows_timer(&self) -> bool {
        true
    }

    fn health_drain_duration(&self, _base: f64, _score: u64, _config: &GameConfig) -> f64 {
        SURVIVAL_DRAIN_SECS
    }

    fn health_regeneration(&self, _base: f64, _cleared: usize, _config: &GameConfig) -> f64 {
        SURVIVAL_REGEN
    }

    fn on_start(&mut self, config: &GameConfig) {
        self.survival_time = 0.0;
        self.since_report = 0.0;
        self.timer_interval = config.timer_interval;
    }

    fn advance(&mut self, delta_secs: f64) -> Option<f64> {
        if delta_secs.is_nan() || delta_secs <= 0.0 {
            return None;
        }
        self.survival_time += delta_secs;
        self.since_report += delta_secs;
        if self.since_report < self.timer_interval {
            return None;
        }
        self.since_report %= self.timer_interval;
        Some(self.survival_time)
    }

    fn on_game_over(&self, _stats: SessionStats) -> GameOverSummary {
        debug!(target: "mode", "survived {:.1}s", self.survival_time);
        GameOverSummary {
            primary: format!("Survived: {}", format_mm_ss(self.survival_time)),
            secondary: None,
        }
    }

    fn survival_time(&self) -> Option<f64> {
        Some(self.survival_time)
    }
}

/// No pressure at all
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainingMode;

impl ModeLogic for TrainingMode {
    fn mode(&self) -> GameMode {
        GameMode::Training
    }

    fn shows_health_bar(&self) -> bool {
        false
    }
    fn shows_score(&self) -> bool {
        false
    }
    fn shows_level(&self) -> bool {
        false
    }
    fn shows_timer(&self) -> bool {
        false
    }

    fn health_drain_duration(&self, _base: f64, _score: u64, _config: &GameConfig) -> f64 {
        f64::INFINITY
    }

    fn health_regeneration(&self, _base: f64, _cleared: usize, _config: &GameConfig) -> f64 {
        0.0
    }

    fn score(&self, _cleared: usize, _base_multiplier: f64, _combo_multiplier: f64) -> u64 {
        0
    }

    fn is_game_over(&self, _health: f64) -> bool {
        false
    }

    fn on_game_over(&self, _stats: SessionStats) -> GameOverSummary {
        GameOverSummary {
            primary: "Practice Complete".to_string(),
            secondary: None,
        }
    }
}
