//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the rules of the corner-matching puzzle and the
//! session state machine around them. It has **no dependencies** on UI, audio
//! or I/O beyond loading a config file:
//!
//! - **Deterministic**: same seed and same clock readings produce the same game
//! - **Testable**: time comes from an injected [`Clock`], events go to an
//!   injected [`GameObserver`]
//! - **Portable**: runs in a terminal, a GUI shell or headless
//!
//! # Module Structure
//!
//! - [`grid`]: square board storage, corner checks, refill, match search
//! - [`engine`]: selection, match resolution, health clock, lifecycle
//! - [`mode`]: Classic / Survival / Training policies
//! - [`combo`], [`scoring`], [`level`]: the numbers behind a match
//! - [`observer`]: outbound notifications and an [`EventLog`] recorder
//! - [`config`]: tunable constants with serde defaults
//! - [`clock`], [`rng`]: injectable time and seeded color generation
//! - [`snapshot`]: serializable point-in-time view
//!
//! # Game Rules
//!
//! - Tap two squares. If the four corners of the rectangle they span share a
//!   color, every square inside it is cleared and redrawn.
//! - Points are `floor(cells * base * combo)`; matches within 3 seconds of
//!   each other build a combo worth +10%, then +5% per further step.
//! - Health drains continuously (30s for a full bar in Classic, faster as
//!   score and level rise) and each match heals.
//! - Health at zero ends the game, except in Training.
//!
//! # Example
//!
//! ```
//! use quares_core::{Engine, EventLog, GameConfig, ManualClock};
//! use quares_core::types::{GameMode, GridPosition, Square};
//!
//! let config = GameConfig::default().with_seed(12345);
//! let mut engine = Engine::with_observer(config, GameMode::Classic, EventLog::new(), ManualClock::new());
//! engine.start_game();
//!
//! // Paint a 3x3 rectangle's corners the same color and match it
//! for corner in GridPosition::corners(GridPosition::new(0, 0), GridPosition::new(2, 2)) {
//!     engine.set_square(corner, Square::new(0));
//! }
//! engine.select_square(GridPosition::new(0, 0));
//! engine.select_square(GridPosition::new(2, 2));
//!
//! assert_eq!(engine.score(), 9);
//! ```

pub mod clock;
pub mod combo;
pub mod config;
pub mod engine;
pub mod grid;
pub mod level;
pub mod mode;
pub mod observer;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use quares_types as types;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use combo::ComboHandler;
pub use config::GameConfig;
pub use engine::Engine;
pub use grid::Grid;
pub use level::{LevelHandler, LevelProgress};
pub use mode::{
    format_mm_ss, mode_logic, ClassicMode, GameOverSummary, ModeLogic, SessionStats, SurvivalMode,
    TrainingMode,
};
pub use observer::{EventLog, GameEvent, GameObserver, NoopObserver};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, ScoreHandler};
pub use snapshot::{EngineSnapshot, Visibility};
