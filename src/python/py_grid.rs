//! Grid engine bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::EngineConfig;
use crate::grid::{Board, Direction, GridEngine};
use crate::persist;

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

fn parse_direction(name: &str) -> PyResult<Direction> {
    name.parse::<Direction>().map_err(value_error)
}

/// Python wrapper for GridEngine.
///
/// Directions are strings: "up", "down", "left", "right" (or u/d/l/r).
#[pyclass(name = "GridEngine")]
pub struct PyGridEngine(GridEngine);

#[pymethods]
impl PyGridEngine {
    /// Create an engine with an empty board.
    ///
    /// # Arguments
    /// - size: Board edge length
    /// - four_probability: Chance a spawned tile is a 4
    /// - seed: RNG seed for reproducible spawns
    #[new]
    #[pyo3(signature = (size = 4, four_probability = 0.25, seed = 0))]
    fn new(size: usize, four_probability: f64, seed: u64) -> PyResult<Self> {
        let config = EngineConfig::new()
            .with_size(size)
            .with_four_probability(four_probability)
            .with_seed(seed);
        GridEngine::new(config).map(Self).map_err(value_error)
    }

    /// Replace the board (None for empty). Does not spawn.
    #[pyo3(signature = (rows = None))]
    fn initialize(&mut self, rows: Option<Vec<Vec<i64>>>) -> PyResult<()> {
        let board = rows
            .map(|rows| Board::from_rows(&rows))
            .transpose()
            .map_err(value_error)?;
        self.0.initialize(board).map_err(value_error)
    }

    /// Empty the board and spawn the first tile. Returns ((row, col), value).
    fn new_game(&mut self) -> PyResult<((usize, usize), u32)> {
        let spawn = self.0.new_game().map_err(value_error)?;
        Ok(((spawn.position.row, spawn.position.col), spawn.value))
    }

    /// Slide/merge without spawning. Returns whether the board changed.
    fn apply_move(&mut self, direction: &str) -> PyResult<bool> {
        Ok(self.0.apply_move(parse_direction(direction)?))
    }

    /// Slide/merge and spawn if changed. Returns whether the board changed.
    fn play(&mut self, direction: &str) -> PyResult<bool> {
        let outcome = self.0.play(parse_direction(direction)?).map_err(value_error)?;
        Ok(outcome.changed)
    }

    /// Spawn a tile. Raises ValueError on a full board.
    fn spawn_random_tile(&mut self) -> PyResult<((usize, usize), u32)> {
        let spawn = self.0.spawn_random_tile().map_err(value_error)?;
        Ok(((spawn.position.row, spawn.position.col), spawn.value))
    }

    /// Returns (score, best_score).
    fn compute_score(&mut self) -> (u32, u32) {
        self.0.compute_score()
    }

    fn is_terminal(&self) -> bool {
        self.0.is_terminal()
    }

    #[getter]
    fn score(&self) -> u32 {
        self.0.score()
    }

    #[getter]
    fn best_score(&self) -> u32 {
        self.0.best_score()
    }

    /// Board as a list of rows.
    fn board(&self) -> Vec<Vec<u32>> {
        self.0.cells()
    }

    /// Board as a 2-D numpy array.
    fn board_numpy<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let n = self.0.size();
        PyArray1::from_slice_bound(py, self.0.board().cells())
            .reshape([n, n])
            .map_err(value_error)
    }

    /// Saved-game JSON document for the shell's store file.
    fn save_json(&self) -> PyResult<String> {
        persist::to_json(&self.0.save()).map_err(value_error)
    }

    /// Resume from a JSON document written by `save_json`.
    fn resume_json(&mut self, text: &str) -> PyResult<()> {
        let saved = persist::from_json(text).map_err(value_error)?;
        self.0.resume(&saved).map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "GridEngine(size={}, score={}, best={}, game_over={})",
            self.0.size(),
            self.0.score(),
            self.0.best_score(),
            self.0.is_terminal()
        )
    }

    fn __str__(&self) -> String {
        self.0.board().to_string()
    }
}
