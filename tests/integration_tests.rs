//! Integration tests for whole sessions

use quares::bot::{Bot, BotStrategy};
use quares::core::{Engine, EventLog, GameConfig, GameEvent, ManualClock};
use quares::types::{GameMode, GridPosition};

fn engine_with(config: GameConfig, mode: GameMode) -> Engine<EventLog, ManualClock> {
    Engine::with_observer(config, mode, EventLog::new(), ManualClock::new())
}

#[test]
fn test_game_lifecycle() {
    let mut engine = engine_with(GameConfig::default().with_seed(12345), GameMode::Classic);
    assert!(!engine.started());

    engine.start_game();
    assert!(engine.started());
    assert!(engine.is_running());
    assert!(!engine.is_paused());
    assert!(!engine.is_game_over());

    engine.pause_game();
    assert!(engine.is_paused());
    engine.clock_mut().advance_secs(120.0);
    engine.tick();
    assert_eq!(engine.health(), 1.0);

    engine.resume_game();
    assert!(engine.is_running());
    engine.clock_mut().advance_secs(40.0);
    engine.tick();
    assert!(engine.is_game_over());
    assert!(!engine.is_running());
    assert_eq!(
        engine.observer().count(|e| matches!(e, GameEvent::GameOver)),
        1
    );
    assert_eq!(engine.game_over_result().primary, "Score: 0");
}

#[test]
fn test_same_seed_same_session() {
    let play = || {
        let mut engine = engine_with(GameConfig::default().with_seed(42), GameMode::Classic);
        let mut bot = Bot::new(BotStrategy::Random, 7);
        engine.start_game();
        for _ in 0..30 {
            engine.clock_mut().advance_secs(0.5);
            engine.tick();
            bot.play_turn(&mut engine);
        }
        (engine.score(), engine.grid().clone(), bot.stats())
    };

    assert_eq!(play(), play());
}

#[test]
fn test_bot_keeps_classic_alive() {
    let mut engine = engine_with(GameConfig::default().with_seed(9), GameMode::Classic);
    let mut bot = Bot::new(BotStrategy::Largest, 1);
    engine.start_game();

    for _ in 0..50 {
        engine.clock_mut().advance_secs(0.5);
        engine.tick();
        if engine.is_game_over() {
            break;
        }
        bot.play_turn(&mut engine);
    }

    let stats = bot.stats();
    assert!(stats.moves > 0);
    assert!(engine.score() >= stats.cells_cleared as u64);
    assert_eq!(
        engine
            .observer()
            .count(|e| matches!(e, GameEvent::SquaresCleared { .. })),
        stats.moves as usize
    );
}

#[test]
fn test_tap_sequence_produces_notifications() {
    let mut engine = engine_with(GameConfig::default().with_seed(5), GameMode::Classic);
    let first = GridPosition::new(0, 0);
    let second = GridPosition::new(9, 9);

    engine.select_square(first);
    assert_eq!(engine.selected_position(), Some(first));
    assert_eq!(
        engine.observer().last(),
        Some(&GameEvent::SelectionChanged {
            positions: vec![first]
        })
    );

    let matched = engine.grid().is_match(first, second);
    engine.select_square(second);
    assert_eq!(engine.selected_position(), None);

    let log = engine.observer();
    if matched {
        assert!(log.contains(&GameEvent::SquaresCleared {
            from: first,
            to: second
        }));
    } else {
        assert!(log.contains(&GameEvent::SelectionFailed {
            from: first,
            to: second
        }));
    }
}

#[test]
fn test_snapshot_json() {
    let mut engine = engine_with(GameConfig::default().with_seed(1), GameMode::Survival);
    engine.start_game();
    engine.clock_mut().advance_secs(0.5);
    engine.tick();

    let json: serde_json::Value = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["mode"], "survival");
    assert_eq!(json["grid_size"], 10);
    assert_eq!(json["colors"].as_array().unwrap().len(), 10);
    assert_eq!(json["health_drain_duration"], 3.0);
    assert_eq!(json["visibility"]["timer"], true);
    assert!((json["survival_time"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    assert_eq!(json["game_over"], false);
}

#[test]
fn test_config_file_drives_engine() {
    let dir = std::env::temp_dir().join(format!("quares-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{ "grid_size": 6, "number_of_colors": 3, "seed": 11, "initial_health_drain_duration": 10.0 }"#,
    )
    .unwrap();

    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.grid_size, 6);
    assert_eq!(config.number_of_colors, 3);
    // Unspecified fields keep their defaults
    assert_eq!(config.combo_threshold, 3.0);

    let mut engine = engine_with(config, GameMode::Classic);
    assert_eq!(engine.grid().size(), 6);
    assert!(engine.grid().cells().iter().all(|s| s.color_index < 3));

    engine.start_game();
    engine.clock_mut().advance_secs(5.0);
    engine.tick();
    assert!((engine.health() - 0.5).abs() < 1e-9);
}

#[test]
fn test_edge_configs_build_an_engine() {
    let widest = GameConfig::from_json_str(r#"{ "combo_threshold": 3600.0, "seed": 1 }"#).unwrap();
    let mut engine = engine_with(widest, GameMode::Classic);
    assert!(engine.attempt_match(GridPosition::new(0, 0), GridPosition::new(0, 0)));
    engine.clock_mut().advance_secs(3_000.0);
    assert!(engine.attempt_match(GridPosition::new(1, 1), GridPosition::new(1, 1)));
    assert_eq!(engine.current_combo(), 2);

    // Out-of-range values built without validation still construct
    for combo_threshold in [1e30, f64::INFINITY, f64::NAN] {
        let config = GameConfig {
            combo_threshold,
            seed: Some(1),
            ..GameConfig::default()
        };
        let mut engine = engine_with(config, GameMode::Classic);
        engine.start_game();
        assert!(engine.attempt_match(GridPosition::new(0, 0), GridPosition::new(0, 0)));
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(GameConfig::from_json_str(r#"{ "grid_size": 0 }"#).is_err());
    assert!(GameConfig::from_json_str(r#"{ "number_of_colors": 0 }"#).is_err());
    assert!(GameConfig::from_json_str(r#"{ "combo_threshold": 1e30 }"#).is_err());
    assert!(GameConfig::from_json_str("not json").is_err());
}
