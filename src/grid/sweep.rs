//! Shift/merge sweep shared by all four directions.
//!
//! The sweep runs in bands. Band `b` walks the pairs `(depth s+1 -> depth s)`
//! for `s = b, b-1, .., 0`, over every lane. A tile moves one cell per pair,
//! so within a band it can ripple all the way to the edge; the outermost
//! cells are only reached by the last band. Merges are tracked in a mask
//! over the whole board: a marked tile neither absorbs nor donates again
//! during the same move.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::{Board, Position};
use super::direction::Direction;

/// A cell that absorbed a neighbour during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Merge {
    /// Where the merged tile ended up.
    pub position: Position,
    /// Value after merging.
    pub value: u32,
}

/// Merges from one move. A 4×4 board has at most 8.
pub type Merges = SmallVec<[Merge; 8]>;

/// What a sweep did to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Whether any cell changed value.
    pub changed: bool,
    /// Merged cells, row-major.
    pub merges: Merges,
}

/// Per-move record of which cells already hold a merged tile.
struct MergeMask {
    size: usize,
    marks: Vec<bool>,
}

impl MergeMask {
    fn new(size: usize) -> Self {
        Self {
            size,
            marks: vec![false; size * size],
        }
    }

    fn is_marked(&self, pos: Position) -> bool {
        self.marks[pos.row * self.size + pos.col]
    }

    fn mark(&mut self, pos: Position) {
        self.marks[pos.row * self.size + pos.col] = true;
    }

    /// Move a mark along with its tile.
    fn carry(&mut self, from: Position, to: Position) {
        let marked = self.is_marked(from);
        self.marks[from.row * self.size + from.col] = false;
        self.marks[to.row * self.size + to.col] = marked;
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, &marked)| marked)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
    }
}

/// Slide and merge every lane of `board` toward `direction`.
///
/// `observer` sees the board after each band, starting with the first band
/// that changed something; these are the intermediate frames of the move.
pub(crate) fn sweep(board: &mut Board, direction: Direction, mut observer: impl FnMut(&Board)) -> SweepSummary {
    let size = board.size();
    let mut mask = MergeMask::new(size);
    let mut changed = false;

    for band in 0..size.saturating_sub(1) {
        for step in (0..=band).rev() {
            for lane in 0..size {
                let current = direction.cell(lane, step + 1, size);
                let neighbor = direction.cell(lane, step, size);
                changed |= settle_pair(board, &mut mask, current, neighbor);
            }
        }
        if changed {
            observer(board);
        }
    }

    let merges = mask
        .positions()
        .map(|position| Merge {
            position,
            value: board.get(position),
        })
        .collect();

    SweepSummary { changed, merges }
}

/// Shift or merge `current` into `neighbor`. Returns whether anything moved.
fn settle_pair(board: &mut Board, mask: &mut MergeMask, current: Position, neighbor: Position) -> bool {
    let value = board.get(current);
    if value == 0 {
        return false;
    }

    let target = board.get(neighbor);
    if target == 0 {
        board.set(neighbor, value);
        board.set(current, 0);
        mask.carry(current, neighbor);
        return true;
    }

    if target != value || mask.is_marked(current) || mask.is_marked(neighbor) {
        return false;
    }

    // The largest u32 power of two cannot double; leave such pairs alone.
    match value.checked_mul(2) {
        Some(merged) => {
            board.set(neighbor, merged);
            board.set(current, 0);
            mask.mark(neighbor);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(values: [i64; 4]) -> Board {
        Board::from_rows(&[values, [0; 4], [0; 4], [0; 4]]).unwrap()
    }

    fn swept_row(values: [i64; 4], direction: Direction) -> (Vec<u32>, SweepSummary) {
        let mut board = line(values);
        let summary = sweep(&mut board, direction, |_| {});
        (board.row(0).to_vec(), summary)
    }

    #[test]
    fn test_shift_to_edge() {
        let (row, summary) = swept_row([0, 0, 0, 2], Direction::Left);
        assert_eq!(row, vec![2, 0, 0, 0]);
        assert!(summary.changed);
        assert!(summary.merges.is_empty());
    }

    #[test]
    fn test_no_double_merge() {
        let (row, summary) = swept_row([2, 2, 2, 2], Direction::Left);
        assert_eq!(row, vec![4, 4, 0, 0]);
        assert_eq!(summary.merges.len(), 2);

        let (row, _) = swept_row([2, 2, 4, 0], Direction::Left);
        assert_eq!(row, vec![4, 4, 0, 0]);

        let (row, _) = swept_row([4, 4, 8, 0], Direction::Right);
        assert_eq!(row, vec![0, 0, 8, 8]);
    }

    #[test]
    fn test_edge_pair_merges_first() {
        let (row, _) = swept_row([2, 2, 2, 0], Direction::Right);
        assert_eq!(row, vec![0, 0, 2, 4]);

        let (row, _) = swept_row([2, 2, 2, 0], Direction::Left);
        assert_eq!(row, vec![4, 2, 0, 0]);
    }

    #[test]
    fn test_two_merges_in_one_lane() {
        let (row, summary) = swept_row([2, 2, 4, 4], Direction::Right);
        assert_eq!(row, vec![0, 0, 4, 8]);
        assert_eq!(
            summary.merges.as_slice(),
            &[
                Merge { position: Position::new(0, 2), value: 4 },
                Merge { position: Position::new(0, 3), value: 8 },
            ]
        );
    }

    #[test]
    fn test_packed_lane_is_untouched() {
        let (row, summary) = swept_row([2, 4, 2, 4], Direction::Left);
        assert_eq!(row, vec![2, 4, 2, 4]);
        assert!(!summary.changed);
    }

    #[test]
    fn test_columns_move_independently() {
        let mut board = Board::from_rows(&[[2, 0, 4, 0], [2, 0, 0, 8], [0, 4, 4, 0], [0, 4, 0, 8]]).unwrap();
        let summary = sweep(&mut board, Direction::Down, |_| {});

        assert!(summary.changed);
        assert_eq!(board.row(3), &[4, 8, 8, 16]);
        assert_eq!(board.tile_count(), 4);
    }

    #[test]
    fn test_observer_sees_frames() {
        let mut board = line([0, 2, 0, 2]);
        let mut frames = Vec::new();
        sweep(&mut board, Direction::Left, |b| frames.push(b.row(0).to_vec()));

        // The near tile moves in the first band, the far one only in the last.
        assert_eq!(
            frames,
            vec![vec![2, 0, 0, 2], vec![2, 0, 0, 2], vec![4, 0, 0, 0]]
        );
    }

    #[test]
    fn test_observer_silent_on_noop() {
        let mut board = line([2, 4, 8, 16]);
        let mut calls = 0;
        sweep(&mut board, Direction::Left, |_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_max_tiles_do_not_overflow() {
        let top = 1u32 << 31;
        let mut board = Board::from_rows(&[[i64::from(top), i64::from(top)], [0, 0]]).unwrap();
        let summary = sweep(&mut board, Direction::Left, |_| {});
        assert!(!summary.changed);
        assert_eq!(board.row(0), &[top, top]);
    }
}
