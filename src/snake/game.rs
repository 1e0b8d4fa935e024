//! Snake body and tick logic.

use std::collections::VecDeque;

use im::Vector;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::direction::SnakeDirection;
use crate::core::{GameRng, GridError, Result, SnakeConfig, SnakeError};

/// One body cell with its own heading and queue of pending turns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub x: i32,
    pub y: i32,
    pub direction: SnakeDirection,
    /// `(new heading, step at which to take it)`, oldest first.
    pending: VecDeque<(SnakeDirection, u64)>,
}

impl Segment {
    fn new(x: i32, y: i32, direction: SnakeDirection) -> Self {
        Self {
            x,
            y,
            direction,
            pending: VecDeque::new(),
        }
    }

    /// Number of turns queued but not yet taken.
    #[must_use]
    pub fn pending_turns(&self) -> usize {
        self.pending.len()
    }

    fn step_forward(&mut self, step: u64) {
        if let Some(&(direction, due)) = self.pending.front() {
            if due == step {
                self.pending.pop_front();
                self.direction = direction;
            }
        }
        let (dx, dy) = self.direction.delta();
        self.x += dx;
        self.y += dy;
    }
}

/// Snake state machine.
///
/// A turn is queued on every segment, one step later per segment, so the
/// body follows the head around corners. Index 0 is the head.
#[derive(Clone, Debug)]
pub struct Snake {
    config: SnakeConfig,
    segments: Vector<Segment>,
    heading: SnakeDirection,
    step: u64,
    crashed: Option<SnakeError>,
}

impl Snake {
    /// Place a snake at a random spot, keeping the whole body `padding`
    /// cells clear of the edges.
    pub fn new(config: SnakeConfig, rng: &mut GameRng) -> Result<Self> {
        config.validate()?;
        let len = config.body_len()?;
        let (dx, dy) = config.heading.delta();
        let x = rng.gen_range(head_range(config.width, config.padding, len, dx));
        let y = rng.gen_range(head_range(config.height, config.padding, len, dy));
        Self::from_head(config, x, y)
    }

    /// Place a snake with its head at `(x, y)`, body trailing behind.
    pub fn from_head(config: SnakeConfig, x: i32, y: i32) -> Result<Self> {
        config.validate()?;
        let len = config.body_len()?;
        let (dx, dy) = config.heading.delta();
        let segments: Vector<Segment> = (0..len)
            .map(|i| Segment::new(x - i * dx, y - i * dy, config.heading))
            .collect();

        if let Some(outside) = segments.iter().find(|s| !in_field(&config, s.x, s.y)) {
            return Err(GridError::InvalidConfig {
                reason: format!("segment at ({}, {}) is outside the field", outside.x, outside.y),
            });
        }

        Ok(Self {
            heading: config.heading,
            config,
            segments,
            step: 0,
            crashed: None,
        })
    }

    /// Queue a turn. Only quarter turns from the current heading are taken.
    ///
    /// A turn queued while another is still waiting is taken one step after
    /// it, so two turns in the same tick trace an L rather than a reversal.
    pub fn change_direction(&mut self, direction: SnakeDirection) -> bool {
        if self.crashed.is_some() || !self.heading.can_change(direction) {
            return false;
        }

        let step = self.step;
        for (i, segment) in self.segments.iter_mut().enumerate() {
            let mut due = step + 1 + i as u64;
            if let Some(&(_, last)) = segment.pending.back() {
                due = due.max(last + 1);
            }
            segment.pending.push_back((direction, due));
        }
        self.heading = direction;
        trace!(?direction, step, "turn queued");
        true
    }

    /// Move every segment one cell.
    ///
    /// Fails when the head leaves the field or two segments overlap. Once
    /// crashed, the snake stays put and keeps returning the same error.
    pub fn advance(&mut self) -> std::result::Result<(), SnakeError> {
        if let Some(err) = self.crashed {
            return Err(err);
        }

        self.step += 1;
        let step = self.step;
        for segment in self.segments.iter_mut() {
            segment.step_forward(step);
        }

        if let Err(err) = self.check_collisions() {
            debug!(%err, step, "snake crashed");
            self.crashed = Some(err);
            return Err(err);
        }
        Ok(())
    }

    fn check_collisions(&self) -> std::result::Result<(), SnakeError> {
        let head = self.head();
        if !in_field(&self.config, head.x, head.y) {
            return Err(SnakeError::OutOfBounds { x: head.x, y: head.y });
        }

        let mut occupied = FxHashSet::default();
        for segment in &self.segments {
            if !occupied.insert((segment.x, segment.y)) {
                return Err(SnakeError::SelfCollision {
                    x: segment.x,
                    y: segment.y,
                });
            }
        }
        Ok(())
    }

    // === Accessors ===

    /// Body segments, head first.
    #[must_use]
    pub fn segments(&self) -> &Vector<Segment> {
        &self.segments
    }

    #[must_use]
    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    /// Last accepted heading (the head may not have turned yet).
    #[must_use]
    pub fn direction(&self) -> SnakeDirection {
        self.heading
    }

    /// Ticks taken so far.
    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.crashed.is_none()
    }

    #[must_use]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }
}

/// Range of head coordinates on one axis that keeps the trailing body
/// inside the padded field. `d` is the heading's step on this axis.
fn head_range(dim: i32, padding: i32, len: i32, d: i32) -> std::ops::Range<i32> {
    match d {
        -1 => padding..dim - padding - len + 1,
        1 => padding + len - 1..dim - padding,
        _ => padding..dim - padding,
    }
}

fn in_field(config: &SnakeConfig, x: i32, y: i32) -> bool {
    (0..config.width).contains(&x) && (0..config.height).contains(&y)
}
