//! Automatic player
//!
//! The bot looks at the grid, picks a matching rectangle and plays it the way a
//! person would: two taps through [`Engine::select_square`]. It never touches
//! engine internals, so every notification a human move would produce is
//! produced for bot moves as well.

use log::debug;

use quares_core::{Clock, Engine, GameObserver, Grid, SimpleRng};
use quares_types::GridPosition;

/// How the bot chooses among the available matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotStrategy {
    /// Biggest rectangle; ties go to the first in scan order
    #[default]
    Largest,
    /// First rectangle in scan order
    First,
    /// Any matching rectangle, uniformly
    Random,
}

impl BotStrategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "largest" => Some(BotStrategy::Largest),
            "first" => Some(BotStrategy::First),
            "random" => Some(BotStrategy::Random),
            _ => None,
        }
    }
}

/// Running totals for one bot session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotStats {
    pub moves: u32,
    pub cells_cleared: usize,
    /// Turns where the board offered no match
    pub stalled_turns: u32,
}

#[derive(Debug, Clone)]
pub struct Bot {
    strategy: BotStrategy,
    rng: SimpleRng,
    stats: BotStats,
}

impl Bot {
    pub fn new(strategy: BotStrategy, seed: u32) -> Self {
        Self {
            strategy,
            rng: SimpleRng::new(seed),
            stats: BotStats::default(),
        }
    }

    pub fn strategy(&self) -> BotStrategy {
        self.strategy
    }

    pub fn stats(&self) -> BotStats {
        self.stats
    }

    /// Pick a rectangle to play, as (top-left, bottom-right)
    pub fn choose(&mut self, grid: &Grid) -> Option<(GridPosition, GridPosition)> {
        match self.strategy {
            BotStrategy::First => grid.find_match(),
            BotStrategy::Largest => largest_match(grid),
            BotStrategy::Random => {
                let candidates = grid.matching_rectangles();
                if candidates.is_empty() {
                    return None;
                }
                let idx = self.rng.next_range(candidates.len() as u32) as usize;
                candidates.get(idx).copied()
            }
        }
    }

    /// Play one move on `engine`
    ///
    /// Returns the rectangle played, or `None` when the game is over or the
    /// board has no match.
    pub fn play_turn<O: GameObserver, C: Clock>(
        &mut self,
        engine: &mut Engine<O, C>,
    ) -> Option<(GridPosition, GridPosition)> {
        if engine.is_game_over() {
            return None;
        }

        let Some((from, to)) = self.choose(engine.grid()) else {
            self.stats.stalled_turns += 1;
            debug!(target: "bot", "no match on board");
            return None;
        };

        if engine.selected_position().is_some() {
            engine.clear_selection();
        }
        engine.select_square(from);
        engine.select_square(to);

        self.stats.moves += 1;
        self.stats.cells_cleared += GridPosition::area_len(from, to);
        debug!(target: "bot", "played {:?} -> {:?}", from, to);
        Some((from, to))
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new(BotStrategy::default(), 1)
    }
}

fn largest_match(grid: &Grid) -> Option<(GridPosition, GridPosition)> {
    let mut best: Option<((GridPosition, GridPosition), usize)> = None;
    for (from, to) in grid.matching_rectangles() {
        let area = GridPosition::area_len(from, to);
        if best.map_or(true, |(_, best_area)| area > best_area) {
            best = Some(((from, to), area));
        }
    }
    best.map(|(rect, _)| rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quares_core::{EventLog, GameConfig, GameEvent, ManualClock};
    use quares_types::GameMode;

    fn pos(x: i32, y: i32) -> GridPosition {
        GridPosition::new(x, y)
    }

    /// 4x4 board with one 2x2 match of color 1 and one full-board match of color 0
    fn board() -> Grid {
        Grid::from_colors(&[
            vec![0, 2, 3, 0],
            vec![4, 1, 1, 2],
            vec![3, 1, 1, 4],
            vec![0, 4, 2, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_largest_prefers_biggest_rectangle() {
        let mut bot = Bot::new(BotStrategy::Largest, 1);
        assert_eq!(bot.choose(&board()), Some((pos(0, 0), pos(3, 3))));
    }

    #[test]
    fn test_first_takes_scan_order() {
        let mut bot = Bot::new(BotStrategy::First, 1);
        let grid = board();
        assert_eq!(bot.choose(&grid), grid.find_match());
    }

    #[test]
    fn test_random_always_picks_a_match() {
        let mut bot = Bot::new(BotStrategy::Random, 99);
        let grid = board();
        for _ in 0..20 {
            let (from, to) = bot.choose(&grid).unwrap();
            assert!(grid.is_match(from, to));
        }
    }

    #[test]
    fn test_no_match_on_checkerboard() {
        let grid = Grid::from_colors(&[vec![0, 1], vec![2, 3]]).unwrap();
        let mut bot = Bot::default();
        assert_eq!(bot.choose(&grid), None);
    }

    #[test]
    fn test_play_turn_scores_through_engine() {
        let config = GameConfig::default().with_seed(3);
        let mut engine =
            Engine::with_observer(config, GameMode::Classic, EventLog::new(), ManualClock::new());
        engine.start_game();

        let mut bot = Bot::new(BotStrategy::Largest, 1);
        let mut played = 0;
        for _ in 0..10 {
            if bot.play_turn(&mut engine).is_some() {
                played += 1;
            }
        }

        assert_eq!(bot.stats().moves, played);
        if played > 0 {
            assert!(engine.score() > 0);
            assert!(engine
                .observer()
                .count(|e| matches!(e, GameEvent::SquaresCleared { .. }))
                >= played as usize);
        }
        assert_eq!(engine.selected_position(), None);
    }

    #[test]
    fn test_play_turn_after_game_over() {
        let config = GameConfig::default().with_seed(3);
        let mut engine = Engine::with_observer(
            config,
            GameMode::Classic,
            EventLog::new(),
            ManualClock::new(),
        );
        engine.drain_health(1_000.0);

        let mut bot = Bot::default();
        assert_eq!(bot.play_turn(&mut engine), None);
        assert_eq!(bot.stats().moves, 0);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(BotStrategy::from_str("LARGEST"), Some(BotStrategy::Largest));
        assert_eq!(BotStrategy::from_str("random"), Some(BotStrategy::Random));
        assert_eq!(BotStrategy::from_str("greedy"), None);
    }
}
