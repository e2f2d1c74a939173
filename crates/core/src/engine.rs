//! Engine module - owns one game session
//!
//! This module ties together all core components: grid, RNG, combo, score and
//! the active mode policy. It handles selection, match resolution, the health
//! clock and the session lifecycle, and reports every change to its
//! [`GameObserver`].
//!
//! # Session state machine
//!
//! ```text
//!   new ──start_game──▶ running ──pause_game──▶ paused
//!                         ▲  │                    │
//!                         │  └──health hits 0──▶ game over
//!                         └────resume_game────────┘
//! ```
//!
//! `reset_game`/`start_game` are the only ways out of game over. Every other
//! mutating call is a silent no-op once the session is over.
//!
//! # Timing
//!
//! Health drains by elapsed time, not by tick count. Call [`Engine::tick`] from
//! whatever periodic callback the host has (~60Hz is plenty); it reads the
//! injected [`Clock`] and feeds the true delta to [`Engine::drain_health`].
//! Pausing disarms the tick clock, and resuming re-arms it at "now", so time
//! spent paused is never applied.

use std::time::Duration;

use log::{debug, info, trace};

use crate::clock::{Clock, MonotonicClock};
use crate::combo::ComboHandler;
use crate::config::GameConfig;
use crate::grid::Grid;
use crate::level::LevelProgress;
use crate::mode::{mode_logic, GameOverSummary, ModeLogic, SessionStats};
use crate::observer::{GameObserver, NoopObserver};
use crate::rng::SimpleRng;
use crate::scoring::ScoreHandler;
use crate::snapshot::{EngineSnapshot, Visibility};
use crate::types::{GameMode, GridPosition, Square};

/// Complete session state
#[derive(Debug)]
pub struct Engine<O: GameObserver = NoopObserver, C: Clock = MonotonicClock> {
    config: GameConfig,
    mode: Box<dyn ModeLogic>,
    grid: Grid,
    rng: SimpleRng,
    health: f64,
    selected: Option<GridPosition>,
    combo: ComboHandler,
    score: ScoreHandler,
    started: bool,
    /// Tick clock armed (started and not paused)
    running: bool,
    game_over: bool,
    last_tick: Option<Duration>,
    observer: O,
    clock: C,
}

impl Engine {
    /// Session on the wall clock with nobody listening
    pub fn new(config: GameConfig, mode: GameMode) -> Self {
        Self::with_observer(config, mode, NoopObserver, MonotonicClock::new())
    }
}

impl<O: GameObserver, C: Clock> Engine<O, C> {
    pub fn with_observer(config: GameConfig, mode: GameMode, observer: O, clock: C) -> Self {
        let logic = mode_logic(mode, &config);
        Self::with_logic(config, logic, observer, clock)
    }

    /// Session with a caller-supplied mode policy
    pub fn with_logic(config: GameConfig, mode: Box<dyn ModeLogic>, observer: O, clock: C) -> Self {
        let mut rng = config.seed.map(SimpleRng::new).unwrap_or_else(SimpleRng::from_time);
        let grid = Grid::new(config.grid_size, config.number_of_colors, &mut rng);
        let combo = ComboHandler::new(
            config.combo_threshold,
            config.combo_base_bonus_percentage,
            config.combo_increment_percentage,
        );
        let score = ScoreHandler::new(config.base_multiplier);

        Self {
            config,
            mode,
            grid,
            rng,
            health: 1.0,
            selected: None,
            combo,
            score,
            started: false,
            running: false,
            game_over: false,
            last_tick: None,
            observer,
            clock,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode.mode()
    }

    pub fn mode_logic(&self) -> &dyn ModeLogic {
        self.mode.as_ref()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn current_combo(&self) -> u32 {
        self.combo.current_combo()
    }

    pub fn combo_multiplier(&self) -> f64 {
        self.combo.combo_multiplier()
    }

    /// The configured base score multiplier
    pub fn multiplier(&self) -> f64 {
        self.score.base_multiplier()
    }

    pub fn selected_position(&self) -> Option<GridPosition> {
        self.selected
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.started && !self.running && !self.game_over
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn current_level(&self) -> Option<u32> {
        self.mode.level_progress().map(|progress| progress.level)
    }

    pub fn level_progress(&self) -> Option<LevelProgress> {
        self.mode.level_progress()
    }

    pub fn survival_time(&self) -> Option<f64> {
        self.mode.survival_time()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Seconds for health to drain fully at the current difficulty
    pub fn current_health_drain_duration(&self) -> f64 {
        self.mode.health_drain_duration(
            self.config.initial_health_drain_duration,
            self.score.score(),
            &self.config,
        )
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode.mode(),
            grid_size: self.grid.size(),
            colors: self.grid.color_rows(),
            selected: self.selected,
            health: self.health,
            score: self.score.score(),
            combo: self.combo.current_combo(),
            combo_multiplier: self.combo.combo_multiplier(),
            level: self.mode.level_progress(),
            survival_time: self.mode.survival_time(),
            health_drain_duration: self.current_health_drain_duration(),
            visibility: Visibility {
                health_bar: self.mode.shows_health_bar(),
                score: self.mode.shows_score(),
                level: self.mode.shows_level(),
                timer: self.mode.shows_timer(),
            },
            started: self.started,
            paused: self.is_paused(),
            game_over: self.game_over,
        }
    }

    // ---------------------------------------------------------------------
    // Grid

    /// Redraw every cell
    pub fn initialize_grid(&mut self) {
        self.grid
            .fill_random(self.config.number_of_colors, &mut self.rng);
    }

    pub fn is_valid_position(&self, pos: GridPosition) -> bool {
        self.grid.is_valid(pos)
    }

    pub fn square(&self, pos: GridPosition) -> Option<Square> {
        self.grid.get(pos)
    }

    pub fn color_index(&self, pos: GridPosition) -> Option<u8> {
        self.grid.color_index(pos)
    }

    /// Overwrite one cell (scripted setups, puzzles, tests)
    ///
    /// Rejects off-grid positions and colors outside the configured palette.
    pub fn set_square(&mut self, pos: GridPosition, square: Square) -> bool {
        if square.color_index as usize >= self.config.number_of_colors {
            return false;
        }
        self.grid.set(pos, square)
    }

    // ---------------------------------------------------------------------
    // Selection

    /// Handle a tap on `pos`
    ///
    /// First tap selects, tapping the selection again deselects, tapping
    /// anything else resolves a match attempt between the two.
    pub fn select_square(&mut self, pos: GridPosition) {
        if self.game_over || !self.grid.is_valid(pos) {
            return;
        }

        match self.selected {
            None => {
                self.selected = Some(pos);
                self.observer.selection_changed(&[pos]);
            }
            Some(current) if current == pos => self.clear_selection(),
            Some(current) => {
                self.attempt_match(current, pos);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.observer.selection_cleared();
    }

    /// Cells a drag from `from` to `to` would cover, each once
    ///
    /// Empty when either end is off the grid.
    pub fn preview_selection(&self, from: GridPosition, to: GridPosition) -> Vec<GridPosition> {
        if !self.grid.is_valid(from) || !self.grid.is_valid(to) {
            return Vec::new();
        }
        GridPosition::area(from, to)
    }

    // ---------------------------------------------------------------------
    // Matching

    /// Try to clear the rectangle spanned by `from` and `to`
    ///
    /// Returns true on a successful match. Either way the selection ends up
    /// cleared.
    pub fn attempt_match(&mut self, from: GridPosition, to: GridPosition) -> bool {
        if self.game_over {
            return false;
        }

        let corners = GridPosition::corners(from, to);
        if !self.grid.corners_match(&corners) {
            debug!(target: "engine", "no match {:?} -> {:?}", from, to);
            self.observer.selection_failed(from, to);
            self.clear_selection();
            return false;
        }

        self.handle_successful_match(from, to);
        true
    }

    /// Whether the four corners all resolve to squares of one color
    pub fn check_corners_match(&self, corners: &[GridPosition]) -> bool {
        self.grid.corners_match(corners)
    }

    fn handle_successful_match(&mut self, from: GridPosition, to: GridPosition) {
        let area = GridPosition::area(from, to);
        let cleared = area.len();

        let combo = self.combo.update_combo(self.clock.now());
        if combo > 1 {
            self.observer.combo_triggered(combo);
        }

        let points = self.mode.score(
            cleared,
            self.config.base_multiplier,
            self.combo.combo_multiplier(),
        );
        let total = self.score.add_raw_score(points);
        self.observer.score_updated(total);

        self.regenerate_health(cleared);
        self.grid
            .refill(&area, self.config.number_of_colors, &mut self.rng);
        self.mode.on_match(cleared, &mut self.observer);

        debug!(
            target: "engine",
            "cleared {} cells {:?} -> {:?} (+{} points, combo {})",
            cleared, from, to, points, combo
        );

        self.observer.squares_cleared(from, to);
        self.clear_selection();
        self.observer.grid_updated();
    }

    /// Points the rectangle would be worth at base multiplier, no combo
    ///
    /// Zero when either end is off the grid.
    pub fn calculate_score(&self, from: GridPosition, to: GridPosition) -> u64 {
        if !self.grid.is_valid(from) || !self.grid.is_valid(to) {
            return 0;
        }
        self.score.calculate_area_score(from, to)
    }

    /// Add points for `cleared` cells at the current combo multiplier
    pub fn add_score(&mut self, cleared: usize) {
        if self.game_over {
            return;
        }
        let total = self
            .score
            .add_score(cleared, self.combo.combo_multiplier());
        self.observer.score_updated(total);
    }

    // ---------------------------------------------------------------------
    // Health

    /// Heal according to the mode's regen formula, capped at full
    pub fn regenerate_health(&mut self, cleared: usize) {
        if self.game_over {
            return;
        }
        let amount = self.mode.health_regeneration(
            self.config.health_regeneration_percentage,
            cleared,
            &self.config,
        );
        self.health = (self.health + amount).clamp(0.0, 1.0);
        self.observer.health_updated(self.health);
    }

    /// Drain health by `delta_secs` of elapsed time
    pub fn drain_health(&mut self, delta_secs: f64) {
        if self.game_over {
            return;
        }

        let delta = if delta_secs.is_finite() {
            delta_secs.max(0.0)
        } else {
            0.0
        };
        let duration = self.current_health_drain_duration();
        self.health = (self.health - delta / duration).clamp(0.0, 1.0);
        trace!(target: "engine", "drain {:.4}s over {:.2}s -> health {:.4}", delta, duration, self.health);

        self.observer.health_updated(self.health);

        if self.mode.is_game_over(self.health) {
            self.trigger_game_over();
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle

    /// Reset everything and start the clock
    pub fn start_game(&mut self) {
        self.reset_game();
        self.started = true;
        self.running = true;
        self.last_tick = Some(self.clock.now());
        info!(target: "engine", "{} game started", self.mode.mode());
    }

    /// Back to a fresh board: full health, zero score, no combo, level 1
    pub fn reset_game(&mut self) {
        self.score.reset_score();
        self.health = 1.0;
        self.game_over = false;
        self.selected = None;
        self.combo.reset_combo();
        self.initialize_grid();
        self.mode.on_start(&self.config);

        self.observer.grid_updated();
        self.observer.score_updated(self.score.score());
        self.observer.health_updated(self.health);
        self.observer.selection_cleared();
        if let Some(progress) = self.mode.level_progress() {
            self.observer.level_updated(progress);
        }
    }

    /// Stop the clock; nothing drains until `resume_game`
    pub fn pause_game(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_tick = None;
        info!(target: "engine", "paused");
    }

    /// Restart the clock from now
    pub fn resume_game(&mut self) {
        if self.game_over || !self.started || self.running {
            return;
        }
        self.running = true;
        self.last_tick = Some(self.clock.now());
        info!(target: "engine", "resumed");
    }

    /// Periodic clock step
    ///
    /// Applies the time elapsed since the previous tick (or since
    /// start/resume). Does nothing while paused, before start, or after
    /// game over.
    pub fn tick(&mut self) {
        if !self.running || self.game_over {
            return;
        }

        let now = self.clock.now();
        let Some(last) = self.last_tick.replace(now) else {
            return;
        };
        let delta = now.saturating_sub(last).as_secs_f64();

        if let Some(elapsed) = self.mode.advance(delta) {
            self.observer.survival_timer_updated(elapsed);
        }
        self.drain_health(delta);
    }

    /// End-of-game display strings from the active mode
    pub fn game_over_result(&self) -> GameOverSummary {
        self.mode.on_game_over(SessionStats {
            score: self.score.score(),
        })
    }

    fn trigger_game_over(&mut self) {
        self.game_over = true;
        self.running = false;
        self.last_tick = None;
        info!(
            target: "engine",
            "game over: score {}, mode {}",
            self.score.score(),
            self.mode.mode()
        );
        self.observer.game_over();
    }
}
