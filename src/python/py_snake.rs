//! Snake bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{GameRng, SnakeConfig};
use crate::snake::{Snake, SnakeDirection};

fn parse_direction(name: &str) -> PyResult<SnakeDirection> {
    match name.to_ascii_lowercase().as_str() {
        "up" | "u" => Ok(SnakeDirection::Up),
        "down" | "d" => Ok(SnakeDirection::Down),
        "left" | "l" => Ok(SnakeDirection::Left),
        "right" | "r" => Ok(SnakeDirection::Right),
        _ => Err(PyErr::new::<PyValueError, _>(format!("unknown direction: {:?}", name))),
    }
}

/// Python wrapper for Snake.
#[pyclass(name = "Snake")]
pub struct PySnake(Snake);

#[pymethods]
impl PySnake {
    /// Create a snake at a random spot on a `width` x `height` field.
    #[new]
    #[pyo3(signature = (width = 40, height = 30, length = 10, seed = 0))]
    fn new(width: i32, height: i32, length: usize, seed: u64) -> PyResult<Self> {
        let config = SnakeConfig::new(width, height).with_length(length);
        Snake::new(config, &mut GameRng::new(seed))
            .map(Self)
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))
    }

    /// Queue a quarter turn. Returns False if the turn was refused.
    fn change_direction(&mut self, direction: &str) -> PyResult<bool> {
        Ok(self.0.change_direction(parse_direction(direction)?))
    }

    /// Advance one tick. Returns False once the snake has crashed.
    fn advance(&mut self) -> bool {
        self.0.advance().is_ok()
    }

    fn is_alive(&self) -> bool {
        self.0.is_alive()
    }

    /// Segment coordinates, head first.
    fn segments(&self) -> Vec<(i32, i32)> {
        self.0.segments().iter().map(|s| (s.x, s.y)).collect()
    }

    #[getter]
    fn step(&self) -> u64 {
        self.0.step()
    }

    fn __repr__(&self) -> String {
        let head = self.0.head();
        format!(
            "Snake(head=({}, {}), length={}, alive={})",
            head.x,
            head.y,
            self.0.segments().len(),
            self.0.is_alive()
        )
    }
}
