//! Observer interface - the engine's only outbound channel
//!
//! Presentation, audio and any other collaborator implement [`GameObserver`]
//! and override just the notifications they care about; every method has a
//! no-op default. [`EventLog`] records notifications as [`GameEvent`] values,
//! in emission order, for tests and headless runners.

use serde::Serialize;

use crate::level::LevelProgress;
use crate::types::GridPosition;

pub trait GameObserver {
    /// The grid changed enough to warrant a full redraw
    fn grid_updated(&mut self) {}

    /// New health value in [0, 1]
    fn health_updated(&mut self, _health: f64) {}

    /// New score total
    fn score_updated(&mut self, _score: u64) {}

    /// Level, experience and next threshold after any experience change
    fn level_updated(&mut self, _progress: LevelProgress) {}

    /// Fired once per level gained, before `level_updated`
    fn leveled_up(&mut self, _level: u32) {}

    /// Positions to highlight
    fn selection_changed(&mut self, _positions: &[GridPosition]) {}

    fn selection_cleared(&mut self) {}

    /// Successful match of the rectangle `from`/`to`
    fn squares_cleared(&mut self, _from: GridPosition, _to: GridPosition) {}

    /// Unsuccessful match attempt
    fn selection_failed(&mut self, _from: GridPosition, _to: GridPosition) {}

    /// Combo streak reached `count` (always >= 2)
    fn combo_triggered(&mut self, _count: u32) {}

    /// Survival elapsed time in seconds
    fn survival_timer_updated(&mut self, _elapsed_secs: f64) {}

    /// Terminal state reached
    fn game_over(&mut self) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

impl<T: GameObserver + ?Sized> GameObserver for Box<T> {
    fn grid_updated(&mut self) {
        (**self).grid_updated()
    }
    fn health_updated(&mut self, health: f64) {
        (**self).health_updated(health)
    }
    fn score_updated(&mut self, score: u64) {
        (**self).score_updated(score)
    }
    fn level_updated(&mut self, progress: LevelProgress) {
        (**self).level_updated(progress)
    }
    fn leveled_up(&mut self, level: u32) {
        (**self).leveled_up(level)
    }
    fn selection_changed(&mut self, positions: &[GridPosition]) {
        (**self).selection_changed(positions)
    }
    fn selection_cleared(&mut self) {
        (**self).selection_cleared()
    }
    fn squares_cleared(&mut self, from: GridPosition, to: GridPosition) {
        (**self).squares_cleared(from, to)
    }
    fn selection_failed(&mut self, from: GridPosition, to: GridPosition) {
        (**self).selection_failed(from, to)
    }
    fn combo_triggered(&mut self, count: u32) {
        (**self).combo_triggered(count)
    }
    fn survival_timer_updated(&mut self, elapsed_secs: f64) {
        (**self).survival_timer_updated(elapsed_secs)
    }
    fn game_over(&mut self) {
        (**self).game_over()
    }
}

/// One notification, as data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GridUpdated,
    HealthUpdated { health: f64 },
    ScoreUpdated { score: u64 },
    LevelUpdated { progress: LevelProgress },
    LeveledUp { level: u32 },
    SelectionChanged { positions: Vec<GridPosition> },
    SelectionCleared,
    SquaresCleared { from: GridPosition, to: GridPosition },
    SelectionFailed { from: GridPosition, to: GridPosition },
    ComboTriggered { count: u32 },
    SurvivalTimerUpdated { elapsed_secs: f64 },
    GameOver,
}

/// Records every notification in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }
}

impl GameObserver for EventLog {
    fn grid_updated(&mut self) {
        self.events.push(GameEvent::GridUpdated);
    }
    fn health_updated(&mut self, health: f64) {
        self.events.push(GameEvent::HealthUpdated { health });
    }
    fn score_updated(&mut self, score: u64) {
        self.events.push(GameEvent::ScoreUpdated { score });
    }
    fn level_updated(&mut self, progress: LevelProgress) {
        self.events.push(GameEvent::LevelUpdated { progress });
    }
    fn leveled_up(&mut self, level: u32) {
        self.events.push(GameEvent::LeveledUp { level });
    }
    fn selection_changed(&mut self, positions: &[GridPosition]) {
        self.events.push(GameEvent::SelectionChanged {
            positions: positions.to_vec(),
        });
    }
    fn selection_cleared(&mut self) {
        self.events.push(GameEvent::SelectionCleared);
    }
    fn squares_cleared(&mut self, from: GridPosition, to: GridPosition) {
        self.events.push(GameEvent::SquaresCleared { from, to });
    }
    fn selection_failed(&mut self, from: GridPosition, to: GridPosition) {
        self.events.push(GameEvent::SelectionFailed { from, to });
    }
    fn combo_triggered(&mut self, count: u32) {
        self.events.push(GameEvent::ComboTriggered { count });
    }
    fn survival_timer_updated(&mut self, elapsed_secs: f64) {
        self.events.push(GameEvent::SurvivalTimerUpdated { elapsed_secs });
    }
    fn game_over(&mut self) {
        self.events.push(GameEvent::GameOver);
    }
}
