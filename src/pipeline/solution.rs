//! Solution records for both puzzles

use crate::sokoban::{moves_to_string, Direction, Level, Snapshot};
use crate::sudoku::SudokuGrid;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Either a decoded answer or the explicit "no solution" sentinel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "solution", rename_all = "snake_case")]
pub enum Outcome<T> {
    Solved(T),
    Unsatisfiable,
}

impl<T> Outcome<T> {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solved(&self) -> Option<&T> {
        match self {
            Outcome::Solved(value) => Some(value),
            Outcome::Unsatisfiable => None,
        }
    }

    pub fn into_solved(self) -> Option<T> {
        match self {
            Outcome::Solved(value) => Some(value),
            Outcome::Unsatisfiable => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Solved(value) => Outcome::Solved(f(value)),
            Outcome::Unsatisfiable => Outcome::Unsatisfiable,
        }
    }
}

/// A solved Sudoku
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SudokuSolution {
    pub puzzle: SudokuGrid,
    pub grid: SudokuGrid,
    pub variables: usize,
    pub clauses: usize,
    /// Time spent inside the SAT solver
    #[serde(skip)]
    pub solve_time: Duration,
}

impl SudokuSolution {
    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// A solved Sokoban level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SokobanSolution {
    pub level: Level,
    /// Horizon of the encoding that produced the plan
    pub horizon: usize,
    pub moves: Vec<Direction>,
    /// State at every encoded time step, idle steps included
    pub trajectory: Vec<Snapshot>,
    /// Horizons tried before this one succeeded, plus one
    pub attempts: usize,
    pub variables: usize,
    pub clauses: usize,
    #[serde(skip)]
    pub solve_time: Duration,
}

impl SokobanSolution {
    /// Moves as a compact `UDLR` string
    pub fn move_string(&self) -> String {
        moves_to_string(&self.moves)
    }

    /// Get a summary of the solution
    pub fn summary(&self) -> SokobanSummary {
        SokobanSummary {
            moves: self.move_string(),
            move_count: self.moves.len(),
            horizon: self.horizon,
            attempts: self.attempts,
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Each state of the plan drawn on the level, skipping idle steps
    pub fn format_evolution(&self) -> String {
        let mut result = String::new();
        let mut step = 0;

        result.push_str(&format!("Step {}:\n", step));
        result.push_str(&self.level.render(&self.level.initial_state()));

        for pair in self.trajectory.windows(2) {
            if pair[0].agent == pair[1].agent {
                continue;
            }
            step += 1;
            let dir = self.moves[step - 1];
            result.push_str(&format!("\nStep {} ({}):\n", step, dir));
            result.push_str(&self.level.render(&pair[1]));
        }

        result
    }
}

/// Short description of a Sokoban solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SokobanSummary {
    pub moves: String,
    pub move_count: usize,
    pub horizon: usize,
    pub attempts: usize,
    pub solve_time_ms: u64,
}
