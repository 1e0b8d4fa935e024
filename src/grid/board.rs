//! The N×N tile board.
//!
//! Cells are stored row-major in a flat `Vec<u32>`; row 0 is the top.
//! 0 means empty, anything else is a tile holding a power of two.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::sweep;
use crate::core::BoardDefect;

/// A cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Square grid of tiles.
///
/// Serialized as a list of rows; deserializing runs the same checks as
/// `from_rows`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from rows, checking shape and tile values.
    ///
    /// The edge length is taken from the row count; every row must have
    /// that many cells. Values are signed so that a tampered save file
    /// with negative cells is reported rather than silently wrapped.
    ///
    /// ```
    /// use tile_grid::grid::Board;
    ///
    /// let board = Board::from_rows(&[[2, 0], [0, 4]]).unwrap();
    /// assert_eq!(board.size(), 2);
    /// assert_eq!(board.max_tile(), 4);
    ///
    /// assert!(Board::from_rows(&[[3, 0], [0, 0]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, BoardDefect> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(BoardDefect::RowLength {
                    row,
                    expected: size,
                    actual: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                cells.push(tile_from_i64(row, col, value)?);
            }
        }

        Ok(Self { size, cells })
    }

    /// Rows as plain vectors, e.g. for a save file.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.size).map(<[u32]>::to_vec).collect()
    }

    /// Edge length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// One row of cells.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u32] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Value at a position (0 when empty).
    #[must_use]
    pub fn get(&self, pos: Position) -> u32 {
        self.cells[self.offset(pos)]
    }

    pub(crate) fn set(&mut self, pos: Position, value: u32) {
        let offset = self.offset(pos);
        self.cells[offset] = value;
    }

    /// Largest tile on the board, 0 when empty.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of every tile. Moves conserve this exactly.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions().filter(|&pos| self.get(pos) == 0).collect()
    }

    /// Whether any cell is empty.
    #[must_use]
    pub fn has_empty(&self) -> bool {
        self.cells.contains(&0)
    }

    /// Whether two equal tiles touch along a row or column.
    #[must_use]
    pub fn has_adjacent_pair(&self) -> bool {
        self.positions().any(|pos| {
            let value = self.get(pos);
            if value == 0 {
                return false;
            }
            let right = pos.col + 1 < self.size && self.get(Position::new(pos.row, pos.col + 1)) == value;
            let down = pos.row + 1 < self.size && self.get(Position::new(pos.row + 1, pos.col)) == value;
            right || down
        })
    }

    /// No empty cell and no mergeable pair: no move can change the board.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.has_empty() && !self.has_adjacent_pair()
    }

    /// Whether moving in `direction` would change the board.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        let mut probe = self.clone();
        sweep::sweep(&mut probe, direction, |_| {}).changed
    }

    /// Directions that would change the board.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_move(d))
            .collect()
    }

    /// Board turned a quarter clockwise: `new[i][j] = old[n-1-j][i]`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let n = self.size;
        self.remap(|pos| Position::new(n - 1 - pos.col, pos.row))
    }

    /// Board turned a quarter counter-clockwise: `new[i][j] = old[j][n-1-i]`.
    #[must_use]
    pub fn rotated_counter_clockwise(&self) -> Self {
        let n = self.size;
        self.remap(|pos| Position::new(pos.col, n - 1 - pos.row))
    }

    /// Board mirrored along the main diagonal.
    #[must_use]
    pub fn transposed(&self) -> Self {
        self.remap(|pos| Position::new(pos.col, pos.row))
    }

    /// Iterate every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let n = self.size;
        (0..n).flat_map(move |row| (0..n).map(move |col| Position::new(row, col)))
    }

    /// Build a new board where each target cell reads from `source(target)`.
    fn remap(&self, source: impl Fn(Position) -> Position) -> Self {
        let mut out = Self::empty(self.size);
        for pos in self.positions() {
            out.set(pos, self.get(source(pos)));
        }
        out
    }

    fn offset(&self, pos: Position) -> usize {
        debug_assert!(pos.row < self.size && pos.col < self.size, "position {} off board", pos);
        pos.row * self.size + pos.col
    }
}

impl TryFrom<Vec<Vec<i64>>> for Board {
    type Error = BoardDefect;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, BoardDefect> {
        Self::from_rows(&rows)
    }
}

impl From<Board> for Vec<Vec<i64>> {
    fn from(board: Board) -> Self {
        board
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(i64::from).collect())
            .collect()
    }
}

impl Index<Position> for Board {
    type Output = u32;

    fn index(&self, pos: Position) -> &u32 {
        &self.cells[self.offset(pos)]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max_tile().max(1).to_string().len();
        for row in 0..self.size {
            let line: Vec<String> = self
                .row(row)
                .iter()
                .map(|v| format!("{:>width$}", v, width = width))
                .collect();
            writeln!(f, "[{}]", line.join(", "))?;
        }
        Ok(())
    }
}

/// Tile values are 0 or a power of two no smaller than 2.
pub(crate) fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

fn tile_from_i64(row: usize, col: usize, value: i64) -> Result<u32, BoardDefect> {
    if value < 0 {
        return Err(BoardDefect::Negative { row, col, value });
    }
    match u32::try_from(value) {
        Ok(tile) if is_tile_value(tile) => Ok(tile),
        _ => Err(BoardDefect::NotPowerOfTwo { row, col, value }),
    }
}
