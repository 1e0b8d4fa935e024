//! Save/resume integration tests.
//!
//! These exercise the path the shell takes: save on quit, write the JSON
//! store, read it back on startup, and resume.

use tile_grid::core::{EngineConfig, GridError};
use tile_grid::grid::{Board, Direction, GridEngine};
use tile_grid::persist::{self, SavedGame};

fn played_engine(seed: u64) -> GridEngine {
    let moves = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
    GridEngine::replay(EngineConfig::new().with_seed(seed), &moves).unwrap()
}

#[test]
fn test_json_store_round_trip_continues_identically() {
    let mut original = played_engine(17);
    let text = persist::to_json(&original.save()).unwrap();

    let mut resumed = GridEngine::new(EngineConfig::new().with_seed(999)).unwrap();
    resumed.resume(&persist::from_json(&text).unwrap()).unwrap();

    assert_eq!(resumed.board(), original.board());
    assert_eq!(resumed.best_score(), original.best_score());
    assert_eq!(resumed.is_terminal(), original.is_terminal());

    // The RNG checkpoint makes the next spawns match too.
    for direction in [Direction::Down, Direction::Left, Direction::Up] {
        let a = original.play(direction).unwrap();
        let b = resumed.play(direction).unwrap();
        assert_eq!(a, b);
    }
    assert_eq!(resumed.board(), original.board());
}

#[test]
fn test_binary_checkpoint_round_trip() {
    let original = played_engine(23);
    let bytes = persist::to_bytes(&original.save()).unwrap();

    let mut resumed = GridEngine::new(EngineConfig::new()).unwrap();
    resumed.resume(&persist::from_bytes(&bytes).unwrap()).unwrap();

    assert_eq!(resumed.board(), original.board());
    assert_eq!(resumed.rng_state(), original.rng_state());
}

#[test]
fn test_legacy_store_without_rng() {
    let text = r#"{
        "best_score": 256,
        "game_over": false,
        "array": [[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 128, 0], [0, 0, 0, 4]]
    }"#;

    let mut engine = GridEngine::new(EngineConfig::new().with_seed(4)).unwrap();
    engine.resume(&persist::from_json(text).unwrap()).unwrap();

    assert_eq!(engine.board().row(2), &[0, 0, 128, 0]);
    assert_eq!(engine.score(), 128);
    assert_eq!(engine.best_score(), 256);
    assert!(!engine.is_terminal());
}

#[test]
fn test_empty_store_starts_fresh_game() {
    let mut engine = GridEngine::new(EngineConfig::new().with_seed(4)).unwrap();
    engine.resume(&persist::from_json("{}").unwrap()).unwrap();

    assert_eq!(engine.board().tile_count(), 1);
    assert_eq!(engine.best_score(), engine.score());
}

#[test]
fn test_stale_game_over_flag_is_corrected() {
    let saved = SavedGame {
        best_score: 4,
        game_over: true,
        array: vec![vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
        rng: None,
    };

    let mut engine = GridEngine::new(EngineConfig::new()).unwrap();
    engine.resume(&saved).unwrap();
    assert!(!engine.is_terminal());
    assert!(engine.apply_move(Direction::Left));
}

#[test]
fn test_locked_store_resumes_terminal() {
    let saved = SavedGame {
        best_score: 4,
        game_over: true,
        array: vec![
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
        ],
        rng: None,
    };

    let mut engine = GridEngine::new(EngineConfig::new()).unwrap();
    engine.resume(&saved).unwrap();
    assert!(engine.is_terminal());
    assert!(engine.save().game_over);
}

#[test]
fn test_tampered_store_is_rejected_without_changes() {
    let mut engine = played_engine(8);
    let before: Board = engine.board().clone();

    let negative = SavedGame {
        array: vec![vec![2, -4, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
        ..SavedGame::default()
    };
    assert!(matches!(engine.resume(&negative), Err(GridError::InvalidBoard(_))));

    let odd = SavedGame {
        array: vec![vec![3, 0, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
        ..SavedGame::default()
    };
    assert!(matches!(engine.resume(&odd), Err(GridError::InvalidBoard(_))));

    let ragged = SavedGame {
        array: vec![vec![2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
        ..SavedGame::default()
    };
    assert!(engine.resume(&ragged).is_err());

    assert_eq!(engine.board(), &before);
}

#[test]
fn test_malformed_json_is_a_decode_error() {
    let err = persist::from_json("{ not json").unwrap_err();
    assert!(matches!(err, GridError::Decode(_)));
}
