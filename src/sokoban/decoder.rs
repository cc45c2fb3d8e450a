//! Turns a satisfying assignment back into a move sequence
//!
//! At every time step the encoding makes exactly one agent literal true, so
//! the agent's position is read off directly instead of probing neighbours.
//! Idle steps (same cell twice) emit no move.

use super::level::{Direction, Level, Position, Snapshot};
use super::variables::SokobanVariables;
use crate::sat::Model;
use anyhow::Result;

/// A decoded plan: the move list and the state at every time step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub moves: Vec<Direction>,
    /// One snapshot per time step `0..=T`
    pub trajectory: Vec<Snapshot>,
}

/// Decode a model produced for a Sokoban encoding
pub fn decode_model(model: &Model, variables: &SokobanVariables, level: &Level) -> Result<Plan> {
    let floor = level.floor_cells();
    let mut trajectory = Vec::with_capacity(variables.horizon() + 1);

    for t in 0..=variables.horizon() {
        let agent = unique_position(&floor, |pos| model.is_true(variables.agent(pos, t)))
            .map_err(|found| anyhow::anyhow!("Agent has {} positions at time {}", found, t))?;

        let mut boxes = Vec::with_capacity(variables.box_count());
        for id in 0..variables.box_count() {
            let pos = unique_position(&floor, |pos| model.is_true(variables.box_at(id, pos, t)))
                .map_err(|found| anyhow::anyhow!("Box {} has {} positions at time {}", id, found, t))?;
            boxes.push(pos);
        }

        trajectory.push(Snapshot { agent, boxes });
    }

    let mut moves = Vec::new();
    for (t, step) in trajectory.windows(2).enumerate() {
        let (from, to) = (step[0].agent, step[1].agent);
        if from == to {
            continue;
        }
        let dir = Direction::between(from, to).ok_or_else(|| {
            anyhow::anyhow!(
                "Agent jumps from {:?} to {:?} between times {} and {}",
                from,
                to,
                t,
                t + 1
            )
        })?;
        moves.push(dir);
    }

    Ok(Plan { moves, trajectory })
}

/// The single cell satisfying `holds`, or how many did
fn unique_position<F: Fn(Position) -> bool>(cells: &[Position], holds: F) -> Result<Position, usize> {
    let mut found = cells.iter().copied().filter(|&pos| holds(pos));
    match (found.next(), found.next()) {
        (Some(pos), None) => Ok(pos),
        (None, _) => Err(0),
        (Some(_), Some(_)) => Err(2 + found.count()),
    }
}
