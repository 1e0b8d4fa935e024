//! The 2048 grid: board, directions, the shift/merge sweep, and the engine.
//!
//! - `Board` is the N×N tile matrix with pure queries (terminal, rotations)
//! - `Direction::cell` is the coordinate transform that lets one sweep
//!   serve all four moves
//! - `GridEngine` owns a board, an injected RNG, and the derived score and
//!   game-over state

pub mod board;
pub mod direction;
pub mod engine;
mod sweep;

pub use board::{Board, Position};
pub use direction::{Direction, ParseDirectionError};
pub use engine::{GridEngine, MoveOutcome, MoveRecord, Spawn};
pub use sweep::{Merge, Merges};
