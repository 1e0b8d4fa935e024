//! Companion Snake game.
//!
//! A much smaller state machine than the grid engine:
//! - The body is a list of segments, each moving in its own direction
//! - A turn is queued on every segment, delayed by its distance from the head
//! - Each tick moves every segment one cell, then checks the head against
//!   the field edges and the body against itself

mod direction;
mod game;

pub use direction::SnakeDirection;
pub use game::{Segment, Snake};
