//! SAT plumbing shared by both puzzle encodings

pub mod clause;
pub mod solver;

pub use clause::{Clause, ClauseSet};
pub use solver::{solve_clause_set, Model, SatSolver, SolveOutcome, SolverOptions, SolverSolution};
