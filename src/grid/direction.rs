//! Move directions and the coordinate transform behind them.
//!
//! Every direction is reduced to the same shape: a set of lanes running
//! toward a target edge. `Direction::cell` maps `(lane, depth)` to a board
//! position, where depth 0 is the cell on the target edge. The sweep only
//! ever talks in lanes and depths, so one routine serves all four moves
//! without rotating the board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::board::Position;

/// Direction tiles slide in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Whether lanes are columns (vertical moves) rather than rows.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Position of the cell `depth` steps back from the target edge in `lane`.
    ///
    /// ```
    /// use tile_grid::grid::{Direction, Position};
    ///
    /// // Moving right, depth 0 of row 1 is its rightmost cell.
    /// assert_eq!(Direction::Right.cell(1, 0, 4), Position::new(1, 3));
    /// // Moving up, depth 2 of column 3 is row 2.
    /// assert_eq!(Direction::Up.cell(3, 2, 4), Position::new(2, 3));
    /// ```
    #[must_use]
    pub const fn cell(self, lane: usize, depth: usize, size: usize) -> Position {
        match self {
            Direction::Up => Position::new(depth, lane),
            Direction::Down => Position::new(size - 1 - depth, lane),
            Direction::Left => Position::new(lane, depth),
            Direction::Right => Position::new(lane, size - 1 - depth),
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Error for an unrecognized direction name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts full names and single letters, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}
