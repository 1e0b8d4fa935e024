//! Core engine types: RNG, configuration, errors.
//!
//! Shared by the grid and snake engines. Nothing here knows about tiles or
//! segments beyond the configuration knobs.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{EngineConfig, SnakeConfig, DEFAULT_BOARD_SIZE, DEFAULT_FOUR_PROBABILITY, MAX_BOARD_SIZE};
pub use error::{BoardDefect, GridError, Result, SnakeError};
pub use rng::{GameRng, GameRngState};
