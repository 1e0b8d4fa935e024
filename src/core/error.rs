//! Error types for the grid and snake engines.
//!
//! Silent no-ops (a move that changes nothing, or a move after game over)
//! are not errors; they surface as `false` return values.

use thiserror::Error;

/// Why a supplied board was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardDefect {
    /// Row count does not match the engine's board size.
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    /// A row has the wrong number of cells.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A cell holds a negative value.
    #[error("cell ({row}, {col}) is negative: {value}")]
    Negative { row: usize, col: usize, value: i64 },

    /// A non-zero cell is not a tile value (a power of two, at least 2).
    #[error("cell ({row}, {col}) is not a power of two >= 2: {value}")]
    NotPowerOfTwo { row: usize, col: usize, value: i64 },
}

/// Errors raised by the grid engine and its persistence codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Malformed board supplied to `initialize` or `resume`.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardDefect),

    /// Spawn requested with zero empty cells.
    #[error("no empty cell to spawn a tile into")]
    NoSpace,

    /// Configuration failed validation.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// A persisted record could not be decoded.
    #[error("failed to decode saved game: {0}")]
    Decode(String),

    /// A persisted record could not be encoded.
    #[error("failed to encode saved game: {0}")]
    Encode(String),
}

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Ways a snake can die on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnakeError {
    /// Two segments occupy the same cell.
    #[error("snake crossed itself at ({x}, {y})")]
    SelfCollision { x: i32, y: i32 },

    /// The head left the field.
    #[error("snake left the field at ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },
}
