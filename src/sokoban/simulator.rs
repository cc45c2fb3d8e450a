//! Plain Sokoban rules, used to replay and check decoded plans

use super::level::{Direction, Level, Snapshot};
use thiserror::Error;

/// Why a move cannot be made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move {index} ({dir}) leaves the grid")]
    OffGrid { index: usize, dir: Direction },
    #[error("move {index} ({dir}) walks into a wall")]
    IntoWall { index: usize, dir: Direction },
    #[error("move {index} ({dir}) pushes a box into a wall, another box or off the grid")]
    BoxBlocked { index: usize, dir: Direction },
}

/// Apply one move to `state`, pushing a box if the agent walks into it
pub fn apply_move(level: &Level, state: &mut Snapshot, dir: Direction, index: usize) -> Result<(), MoveError> {
    let next = level
        .step(state.agent, dir)
        .ok_or(MoveError::OffGrid { index, dir })?;
    if level.is_wall(next) {
        return Err(MoveError::IntoWall { index, dir });
    }

    if let Some(id) = state.box_at(next) {
        let beyond = level
            .step(next, dir)
            .filter(|&pos| !level.is_wall(pos) && state.box_at(pos).is_none())
            .ok_or(MoveError::BoxBlocked { index, dir })?;
        state.boxes[id] = beyond;
    }

    state.agent = next;
    Ok(())
}

/// Outcome of replaying a move list from the level's start
#[derive(Debug, Clone)]
pub struct PlanValidation {
    pub is_valid: bool,
    /// States visited, starting with the initial one; stops at the first illegal move
    pub states: Vec<Snapshot>,
    pub error: Option<MoveError>,
    pub solved: bool,
}

impl PlanValidation {
    pub fn final_state(&self) -> &Snapshot {
        // `states` always holds at least the initial state.
        &self.states[self.states.len() - 1]
    }
}

/// Replay `moves` and report whether they are legal and end with every box on a goal
pub fn validate_plan(level: &Level, moves: &[Direction]) -> PlanValidation {
    let mut state = level.initial_state();
    let mut states = vec![state.clone()];
    let mut error = None;

    for (index, &dir) in moves.iter().enumerate() {
        if let Err(e) = apply_move(level, &mut state, dir, index) {
            error = Some(e);
            break;
        }
        states.push(state.clone());
    }

    let solved = error.is_none() && state.is_solved(level);

    PlanValidation {
        is_valid: solved,
        states,
        error,
        solved,
    }
}

impl std::fmt::Display for PlanValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;
        writeln!(f, "Moves replayed: {}", self.states.len() - 1)?;
        writeln!(f, "All boxes on goals: {}", self.solved)?;
        if let Some(error) = &self.error {
            writeln!(f, "Error: {}", error)?;
        }
        Ok(())
    }
}
