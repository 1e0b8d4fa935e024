//! Engine configuration types.
//!
//! Shells configure the engines at startup by providing:
//! - `EngineConfig`: board size, spawn odds and RNG seed for the grid engine
//! - `SnakeConfig`: field dimensions and body layout for the snake engine
//!
//! Both are serde-deserializable so a shell can keep them in a document,
//! and both validate before an engine accepts them.

use serde::{Deserialize, Serialize};

use super::error::{GridError, Result};
use crate::snake::SnakeDirection;

/// Board edge length used by the classic game.
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Largest board edge length an engine accepts.
pub const MAX_BOARD_SIZE: usize = 64;

/// Probability that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.25;

/// Configuration for a `GridEngine`.
///
/// ## Example
///
/// ```
/// use tile_grid::core::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_seed(7)
///     .with_four_probability(0.1);
///
/// assert_eq!(config.size, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board edge length (N of the N×N grid).
    pub size: usize,

    /// Chance that a spawn produces a 4.
    pub four_probability: f64,

    /// Seed for the engine's RNG when none is injected.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            four_probability: DEFAULT_FOUR_PROBABILITY,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Create the classic 4×4 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board edge length.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the chance of spawning a 4.
    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_BOARD_SIZE).contains(&self.size) {
            return Err(GridError::InvalidConfig {
                reason: format!(
                    "board size must be within [2, {}], got {}",
                    MAX_BOARD_SIZE, self.size
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(GridError::InvalidConfig {
                reason: format!(
                    "four_probability must be within [0, 1], got {}",
                    self.four_probability
                ),
            });
        }
        Ok(())
    }
}

/// Configuration for a `Snake`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Field width in cells.
    pub width: i32,

    /// Field height in cells.
    pub height: i32,

    /// Number of body segments at start.
    pub length: usize,

    /// Minimum distance between the starting body and the field edges.
    pub padding: i32,

    /// Initial heading; the body trails behind it.
    pub heading: SnakeDirection,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            length: 10,
            padding: 5,
            heading: SnakeDirection::Left,
        }
    }
}

impl SnakeConfig {
    /// Create a configuration for a field of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the starting body length.
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the edge padding for the starting position.
    #[must_use]
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the initial heading.
    #[must_use]
    pub fn with_heading(mut self, heading: SnakeDirection) -> Self {
        self.heading = heading;
        self
    }

    /// Check the body fits inside the field.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(GridError::InvalidConfig {
                reason: "snake length must be at least 1".to_string(),
            });
        }
        if self.padding < 0 {
            return Err(GridError::InvalidConfig {
                reason: format!("padding must not be negative, got {}", self.padding),
            });
        }
        let (along, across) = if self.heading.is_vertical() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        };
        let len = self.body_len()?;
        let margins = self.padding.checked_mul(2);
        let needed = margins.and_then(|m| m.checked_add(len));
        let fits = match (needed, margins) {
            (Some(needed), Some(margins)) => along >= needed && across > margins,
            _ => false,
        };
        if !fits {
            return Err(GridError::InvalidConfig {
                reason: format!(
                    "field {}x{} too small for a {}-segment snake with padding {}",
                    self.width, self.height, self.length, self.padding
                ),
            });
        }
        Ok(())
    }

    /// Body length as a field coordinate span.
    pub(crate) fn body_len(&self) -> Result<i32> {
        i32::try_from(self.length).map_err(|_| GridError::InvalidConfig {
            reason: format!("snake length {} does not fit the field", self.length),
        })
    }
}
