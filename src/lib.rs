//! # tile-grid
//!
//! Headless game state for a 2048 sliding-tile puzzle, plus the Snake state
//! machine that shares its shell.
//!
//! ## Design Principles
//!
//! 1. **One Sweep, Four Directions**: Moves are a single shift/merge sweep
//!    parameterized by a coordinate transform. No per-direction copies.
//!
//! 2. **Injected Randomness**: Every engine draws from a seeded `GameRng`,
//!    so games replay exactly from a seed and a move list.
//!
//! 3. **No I/O**: The engines never read files, draw, or poll input. The
//!    presentation shell does that and exchanges `SavedGame` records.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `grid`: Board, directions, the sweep, and `GridEngine`
//! - `persist`: The saved-game record and its JSON/binary codecs
//! - `snake`: Snake segments, turns, and collisions
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod grid;
pub mod persist;
pub mod snake;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, SnakeConfig,
    GameRng, GameRngState,
    BoardDefect, GridError, SnakeError, Result,
};

pub use crate::grid::{
    Board, Position, Direction,
    GridEngine, MoveOutcome, MoveRecord, Spawn,
    Merge, Merges,
};

pub use crate::persist::SavedGame;

pub use crate::snake::{Segment, Snake, SnakeDirection};
