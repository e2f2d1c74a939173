//! Headless Quares runner (default binary).
//!
//! Plays one session with the built-in bot on a simulated clock and prints
//! the end-of-game summary. Useful for balancing config files and for smoke
//! testing the rules without a UI.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use log::info;

use quares::bot::{Bot, BotStrategy};
use quares::core::{Engine, GameConfig, GameObserver, ManualClock};
use quares::types::{GameMode, GridPosition};

/// Headless Quares session driven by the built-in bot
#[derive(Parser, Debug)]
#[command(name = "quares")]
#[command(version)]
struct Args {
    /// Game mode: classic, survival or training
    #[arg(long, default_value = "classic", value_parser = parse_mode)]
    mode: GameMode,

    /// Seed for the board colors (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Maximum number of bot turns
    #[arg(long, default_value_t = 500)]
    steps: u32,

    /// Simulated seconds the bot spends on each turn
    #[arg(long, default_value_t = 1.0)]
    think_time: f64,

    /// Bot move selection: largest, first or random
    #[arg(long, default_value = "largest", value_parser = parse_strategy)]
    strategy: BotStrategy,

    /// JSON config file overriding the built-in constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final engine snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    GameMode::from_str(s).ok_or_else(|| format!("unknown mode '{s}' (classic, survival, training)"))
}

fn parse_strategy(s: &str) -> Result<BotStrategy, String> {
    BotStrategy::from_str(s).ok_or_else(|| format!("unknown strategy '{s}' (largest, first, random)"))
}

/// Session highlights gathered from engine notifications
#[derive(Debug, Default)]
struct Tally {
    best_combo: u32,
    level_ups: u32,
    failed_attempts: u32,
    game_over: bool,
}

impl GameObserver for Tally {
    fn combo_triggered(&mut self, count: u32) {
        self.best_combo = self.best_combo.max(count);
    }

    fn leveled_up(&mut self, _level: u32) {
        self.level_ups += 1;
    }

    fn selection_failed(&mut self, _from: GridPosition, _to: GridPosition) {
        self.failed_attempts += 1;
    }

    fn game_over(&mut self) {
        self.game_over = true;
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    if !args.think_time.is_finite() || args.think_time <= 0.0 {
        bail!("--think-time must be a positive number of seconds");
    }

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    let bot_seed = config.seed.unwrap_or(1);
    let mut engine = Engine::with_observer(config, args.mode, Tally::default(), ManualClock::new());
    let mut bot = Bot::new(args.strategy, bot_seed);

    engine.start_game();
    info!(target: "runner", "{} session, {} turns max", args.mode, args.steps);

    for _ in 0..args.steps {
        engine.clock_mut().advance_secs(args.think_time);
        engine.tick();
        if engine.is_game_over() {
            break;
        }
        bot.play_turn(&mut engine);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        return Ok(());
    }

    let stats = bot.stats();
    let tally = engine.observer();
    let summary = engine.game_over_result();

    println!("Mode:          {}", engine.mode().display_name());
    println!("Moves:         {}", stats.moves);
    println!("Cells cleared: {}", stats.cells_cleared);
    println!("Stalled turns: {}", stats.stalled_turns);
    println!("Best combo:    {}", tally.best_combo);
    println!("Missed taps:   {}", tally.failed_attempts);
    if let Some(level) = engine.current_level() {
        println!("Level:         {} ({} level-ups)", level, tally.level_ups);
    }
    println!("Health:        {:.0}%", engine.health() * 100.0);
    println!(
        "Status:        {}",
        if tally.game_over { "game over" } else { "turn limit reached" }
    );
    println!();
    println!("{}", summary.primary);
    if let Some(secondary) = summary.secondary {
        println!("{secondary}");
    }

    Ok(())
}
