//! Input precondition errors, raised before any clause is generated

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("puzzle grid is empty")]
    EmptyGrid,

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("invalid digit {value} at ({row}, {col}); expected 0-9")]
    InvalidDigit { row: usize, col: usize, value: u8 },

    #[error("invalid character '{ch}' at ({row}, {col})")]
    InvalidCharacter { row: usize, col: usize, ch: char },

    #[error("level has no agent")]
    MissingAgent,

    #[error("level has a second agent at ({row}, {col})")]
    DuplicateAgent { row: usize, col: usize },

    #[error("variable space of {needed} ids does not fit in a 32-bit literal")]
    VariableOverflow { needed: u64 },
}
