//! The grid engine: board ownership, moves, spawns, scoring, terminal state.
//!
//! ## Lifecycle
//!
//! - `initialize` replaces the board (empty or supplied) without spawning
//! - `new_game` initializes and spawns the first tile
//! - `apply_move` slides/merges; `spawn_random_tile` adds a 2 or 4
//! - `play` is the usual input path: move, then spawn if the board changed
//! - `save`/`resume` exchange the persisted record with the shell
//!
//! Score is the largest tile on the board; best score is the largest score
//! seen during the engine's lifetime. Both are recomputed after every
//! mutation. The game-over flag is cached and only recomputed on mutation.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::board::{Board, Position};
use super::direction::Direction;
use super::sweep::{self, Merges, SweepSummary};
use crate::core::{BoardDefect, EngineConfig, GameRng, GameRngState, GridError, Result};
use crate::persist::SavedGame;

/// A tile placed by `spawn_random_tile`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spawn {
    pub position: Position,
    pub value: u32,
}

/// Result of `GridEngine::play`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Direction that was requested.
    pub direction: Direction,
    /// Whether the board changed.
    pub changed: bool,
    /// Cells that absorbed a tile, for merge animations.
    pub merges: Merges,
    /// Tile added after the move, if the board changed.
    pub spawn: Option<Spawn>,
    /// Game-over flag after the move and spawn.
    pub game_over: bool,
}

/// One accepted move in the engine's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Move number since the last reset, starting at 1.
    pub turn: u32,
    pub direction: Direction,
    pub spawn: Option<Spawn>,
}

/// Owner of the board and everything derived from it.
///
/// ## Example
///
/// ```
/// use tile_grid::core::EngineConfig;
/// use tile_grid::grid::{Board, Direction, GridEngine};
///
/// let mut engine = GridEngine::new(EngineConfig::new().with_seed(1)).unwrap();
/// let start = Board::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
/// engine.initialize(Some(start)).unwrap();
///
/// assert!(engine.apply_move(Direction::Left));
/// assert_eq!(engine.board().row(0), &[4, 0, 0, 0]);
/// assert_eq!(engine.compute_score(), (4, 4));
/// ```
#[derive(Clone, Debug)]
pub struct GridEngine {
    config: EngineConfig,
    board: Board,
    rng: GameRng,
    score: u32,
    best_score: u32,
    game_over: bool,
    turn: u32,
    history: Vector<MoveRecord>,
}

impl GridEngine {
    /// Create an engine with an empty board, seeded from `config.seed`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create an engine with an injected RNG.
    pub fn with_rng(config: EngineConfig, rng: GameRng) -> Result<Self> {
        config.validate()?;
        let board = Board::empty(config.size);
        Ok(Self {
            config,
            board,
            rng,
            score: 0,
            best_score: 0,
            game_over: false,
            turn: 0,
            history: Vector::new(),
        })
    }

    /// Replay a game: fresh engine, first spawn, then each direction in turn.
    ///
    /// With the same config (and so the same seed) this reproduces the
    /// boards of the original game exactly.
    pub fn replay(config: EngineConfig, directions: &[Direction]) -> Result<Self> {
        let mut engine = Self::new(config)?;
        engine.new_game()?;
        for &direction in directions {
            engine.play(direction)?;
        }
        Ok(engine)
    }

    // === Lifecycle ===

    /// Replace the board with `starting` (or an empty board).
    ///
    /// Clears game over and the move history, then derives game over from
    /// the new board, so a supplied locked board is terminal straight away.
    /// Does not spawn. A board of the wrong size is rejected and leaves the
    /// engine untouched.
    pub fn initialize(&mut self, starting: Option<Board>) -> Result<()> {
        let board = match starting {
            Some(board) => self.check_size(board)?,
            None => Board::empty(self.config.size),
        };

        self.board = board;
        self.game_over = false;
        self.turn = 0;
        self.history = Vector::new();
        self.refresh_game_over();
        self.compute_score();
        trace!(board = %self.board, "initialized");
        Ok(())
    }

    /// Start over on an empty board with one spawned tile. Best score survives.
    pub fn new_game(&mut self) -> Result<Spawn> {
        self.initialize(None)?;
        self.spawn_random_tile()
    }

    // === Moves ===

    /// Slide and merge toward `direction`. Returns whether the board changed.
    ///
    /// A no-op while the game is over. Does not spawn; see `play`.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        self.apply_move_observed(direction, |_| {})
    }

    /// As `apply_move`, handing intermediate frames to `observer`.
    ///
    /// The observer is called after each sweep band once the board has
    /// started changing, which is enough to animate tiles sliding.
    pub fn apply_move_observed(&mut self, direction: Direction, observer: impl FnMut(&Board)) -> bool {
        self.shift(direction, observer).changed
    }

    /// Move, then spawn a tile if the board changed, and record the move.
    pub fn play(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let SweepSummary { changed, merges } = self.shift(direction, |_| {});

        let spawn = if changed {
            let spawn = self.spawn_random_tile()?;
            self.turn += 1;
            self.history.push_back(MoveRecord {
                turn: self.turn,
                direction,
                spawn: Some(spawn),
            });
            Some(spawn)
        } else {
            None
        };

        Ok(MoveOutcome {
            direction,
            changed,
            merges,
            spawn,
            game_over: self.game_over,
        })
    }

    /// Place a 2 or a 4 in a uniformly chosen empty cell.
    ///
    /// Fails with `NoSpace` on a full board. Recomputes game over.
    pub fn spawn_random_tile(&mut self) -> Result<Spawn> {
        let empty = self.board.empty_cells();
        let position = *self.rng.choose(&empty).ok_or(GridError::NoSpace)?;
        let value = if self.rng.gen_bool(self.config.four_probability) {
            4
        } else {
            2
        };

        self.board.set(position, value);
        self.refresh_game_over();
        self.compute_score();
        debug!(%position, value, "spawned tile");
        Ok(Spawn { position, value })
    }

    // === Scoring ===

    /// Recompute `(score, best_score)` from the board.
    ///
    /// Score is the largest tile; best score never decreases.
    pub fn compute_score(&mut self) -> (u32, u32) {
        self.score = self.board.max_tile();
        self.best_score = self.best_score.max(self.score);
        (self.score, self.best_score)
    }

    /// Cached game-over flag.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.game_over
    }

    // === Accessors ===

    /// Read-only view of the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board rows as plain vectors.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<u32>> {
        self.board.to_rows()
    }

    /// Largest tile currently on the board.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Largest score seen so far.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Board edge length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Accepted moves since the last reset. Cheap to clone.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// RNG checkpoint.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Persistence ===

    /// Snapshot the state the shell persists between sessions.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        SavedGame {
            best_score: self.best_score,
            game_over: self.game_over,
            array: self
                .board
                .to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(i64::from).collect())
                .collect(),
            rng: Some(self.rng.state()),
        }
    }

    /// Continue a saved game.
    ///
    /// The saved array is validated before anything changes. An empty array
    /// (or an all-empty board) starts a fresh game instead. The game-over
    /// flag is derived from the board, not trusted from the record.
    pub fn resume(&mut self, saved: &SavedGame) -> Result<()> {
        let board = if saved.array.is_empty() {
            Board::empty(self.config.size)
        } else {
            self.check_size(Board::from_rows(&saved.array)?)?
        };

        if let Some(state) = &saved.rng {
            self.rng = GameRng::from_state(state);
        }
        self.best_score = self.best_score.max(saved.best_score);
        self.board = board;
        self.turn = 0;
        self.history = Vector::new();
        self.refresh_game_over();
        if saved.game_over != self.game_over {
            warn!(
                saved = saved.game_over,
                derived = self.game_over,
                "saved game-over flag disagrees with board"
            );
        }

        if self.board.tile_count() == 0 {
            self.spawn_random_tile()?;
        }
        self.compute_score();
        Ok(())
    }

    // === Internals ===

    fn shift(&mut self, direction: Direction, observer: impl FnMut(&Board)) -> SweepSummary {
        if self.game_over {
            trace!(%direction, "move ignored after game over");
            return SweepSummary::default();
        }

        let summary = sweep::sweep(&mut self.board, direction, observer);
        if summary.changed {
            self.refresh_game_over();
            self.compute_score();
        }
        trace!(%direction, changed = summary.changed, merges = summary.merges.len(), "moved");
        summary
    }

    fn refresh_game_over(&mut self) {
        let was_over = self.game_over;
        self.game_over = self.board.is_terminal();
        if self.game_over && !was_over {
            debug!(score = self.board.max_tile(), "game over");
        }
    }

    fn check_size(&self, board: Board) -> Result<Board> {
        if board.size() != self.config.size {
            return Err(BoardDefect::RowCount {
                expected: self.config.size,
                actual: board.size(),
            }
            .into());
        }
        Ok(board)
    }
}
