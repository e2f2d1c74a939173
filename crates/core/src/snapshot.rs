use serde::Serialize;

use crate::level::LevelProgress;
use crate::types::{GameMode, GridPosition};

/// Which HUD elements the active mode wants shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Visibility {
    pub health_bar: bool,
    pub score: bool,
    pub level: bool,
    pub timer: bool,
}

/// Point-in-time copy of everything a renderer or recorder needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub mode: GameMode,
    pub grid_size: usize,
    /// `colors[y][x]`
    pub colors: Vec<Vec<u8>>,
    pub selected: Option<GridPosition>,
    pub health: f64,
    pub score: u64,
    pub combo: u32,
    pub combo_multiplier: f64,
    pub level: Option<LevelProgress>,
    pub survival_time: Option<f64>,
    /// Infinite in Training (serialized as `null`)
    pub health_drain_duration: f64,
    pub visibility: Visibility,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl EngineSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn color_at(&self, pos: GridPosition) -> Option<u8> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.colors
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
    }
}
