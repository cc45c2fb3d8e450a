//! Puzzle SAT Solver
//!
//! Encodes 9x9 Sudoku and bounded-horizon Sokoban as CNF, solves them with
//! CaDiCaL and decodes the model back into a grid or a move list.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod sat;
pub mod sokoban;
pub mod sudoku;
pub mod utils;

pub use config::Settings;
pub use error::PuzzleError;
pub use pipeline::{Outcome, SokobanProblem, SokobanSolution, SudokuProblem, SudokuSolution};

use anyhow::Result;
use std::path::Path;

/// Solve the Sudoku stored in `path`
pub fn solve_sudoku<P: AsRef<Path>>(settings: Settings, path: P) -> Result<Outcome<SudokuSolution>> {
    SudokuProblem::from_file(settings, path)?.solve()
}

/// Solve the Sokoban level stored in `path`
pub fn solve_sokoban<P: AsRef<Path>>(settings: Settings, path: P) -> Result<Outcome<SokobanSolution>> {
    SokobanProblem::from_file(settings, path)?.solve()
}
