//! Python bindings for the tile-grid engines.
//!
//! The presentation shell (window, input, drawing) stays in Python and drives
//! the engines through these classes.
//!
//! # Quick Start
//!
//! ```python
//! import tile_grid
//!
//! engine = tile_grid.GridEngine(seed=42)
//! engine.new_game()
//!
//! if engine.play("left"):
//!     print(engine.board_numpy())
//!
//! with open("store.json", "w") as f:
//!     f.write(engine.save_json())
//! ```

use pyo3::prelude::*;

mod py_grid;
mod py_snake;

pub use py_grid::*;
pub use py_snake::*;

/// tile_grid: 2048 grid engine and Snake state machine.
#[pymodule]
fn tile_grid(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGridEngine>()?;
    m.add_class::<PySnake>()?;
    Ok(())
}
