//! Variable addressing for the Sokoban encoding
//!
//! Two proposition families share one id space. For a grid of `rows x cols`,
//! horizon `T` and `B` boxes:
//!
//! - agent at `(row, col)` at time `t`: `((row * cols + col) * (T + 1) + t) + 1`
//! - box `b` at `(row, col)` at time `t`:
//!   `max_agent_id + 1 + (((row * cols + col) * (T + 1) + t) * B + b)`
//!
//! where `max_agent_id = rows * cols * (T + 1)` is exactly the largest agent id,
//! so the box family starts right after it.
//!
//! The agent stride is the column count; a `rows + 1` stride collides as soon
//! as a grid has more columns than that. Box ids use stride `B` rather than
//! `B + 1`, so both families together fill `1..=rows * cols * (T + 1) * (B + 1)`
//! with no gaps.

use super::level::Position;
use crate::error::PuzzleError;

/// A decoded proposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Proposition {
    Agent { pos: Position, t: usize },
    Box { id: usize, pos: Position, t: usize },
}

/// Closed-form variable allocator for one Sokoban instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SokobanVariables {
    rows: usize,
    cols: usize,
    horizon: usize,
    boxes: usize,
    max_agent_id: i32,
    max_variable: i32,
}

impl SokobanVariables {
    /// Fix the arithmetic parameters for one instance
    pub fn new(rows: usize, cols: usize, horizon: usize, boxes: usize) -> Result<Self, PuzzleError> {
        let slots = (rows as u64) * (cols as u64) * (horizon as u64 + 1);
        let needed = slots * (boxes as u64 + 1);
        if needed > i32::MAX as u64 {
            return Err(PuzzleError::VariableOverflow { needed });
        }

        Ok(Self {
            rows,
            cols,
            horizon,
            boxes,
            max_agent_id: slots as i32,
            max_variable: needed as i32,
        })
    }

    /// Index of `(pos, t)` among all cell/time slots
    #[inline]
    fn slot(&self, pos: Position, t: usize) -> usize {
        debug_assert!(pos.0 < self.rows && pos.1 < self.cols && t <= self.horizon);
        (pos.0 * self.cols + pos.1) * (self.horizon + 1) + t
    }

    /// Variable for "the agent is at `pos` at time `t`"
    #[inline]
    pub fn agent(&self, pos: Position, t: usize) -> i32 {
        self.slot(pos, t) as i32 + 1
    }

    /// Variable for "box `id` is at `pos` at time `t`"
    #[inline]
    pub fn box_at(&self, id: usize, pos: Position, t: usize) -> i32 {
        debug_assert!(id < self.boxes);
        self.max_agent_id + 1 + (self.slot(pos, t) * self.boxes + id) as i32
    }

    /// Invert either formula; `None` for ids outside both families
    pub fn decode(&self, var: i32) -> Option<Proposition> {
        if var < 1 || var > self.max_variable {
            return None;
        }

        let (slot, id) = if var <= self.max_agent_id {
            ((var - 1) as usize, None)
        } else {
            let offset = (var - self.max_agent_id - 1) as usize;
            (offset / self.boxes, Some(offset % self.boxes))
        };

        let t = slot % (self.horizon + 1);
        let cell = slot / (self.horizon + 1);
        let pos = (cell / self.cols, cell % self.cols);

        Some(match id {
            None => Proposition::Agent { pos, t },
            Some(id) => Proposition::Box { id, pos, t },
        })
    }

    /// Largest agent id; box ids start right after it
    pub fn max_agent_id(&self) -> i32 {
        self.max_agent_id
    }

    /// Largest id of either family
    pub fn max_variable(&self) -> i32 {
        self.max_variable
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn box_count(&self) -> usize {
        self.boxes
    }
}
