//! End-to-end solving: load, encode, solve, decode and check a puzzle

pub mod batch;
pub mod problem;
pub mod solution;

pub use batch::{solve_directory, BatchEntry, BatchReport, BatchStatus, PuzzleKind};
pub use problem::{SokobanProblem, SudokuProblem};
pub use solution::{Outcome, SokobanSolution, SokobanSummary, SudokuSolution};
