//! Sudoku grid representation

use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the grid
pub const SIZE: usize = 9;
/// Side length of one sub-box
pub const BOX_SIZE: usize = 3;
/// Marker for an unfilled cell
pub const BLANK: u8 = 0;

/// A 9x9 Sudoku grid; 0 marks a blank cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SudokuGrid {
    cells: [[u8; SIZE]; SIZE],
}

impl SudokuGrid {
    /// Create a grid with every cell blank
    pub fn empty() -> Self {
        Self {
            cells: [[BLANK; SIZE]; SIZE],
        }
    }

    /// Create a grid from rows of digits, checking dimensions and range
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, PuzzleError> {
        if rows.is_empty() {
            return Err(PuzzleError::EmptyGrid);
        }
        if rows.len() != SIZE {
            return Err(PuzzleError::RowCount {
                expected: SIZE,
                found: rows.len(),
            });
        }

        let mut grid = Self::empty();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != SIZE {
                return Err(PuzzleError::RowLength {
                    row,
                    found: values.len(),
                    expected: SIZE,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value as usize > SIZE {
                    return Err(PuzzleError::InvalidDigit { row, col, value });
                }
                grid.cells[row][col] = value;
            }
        }

        Ok(grid)
    }

    /// Digit at a cell, `BLANK` if unfilled
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    /// Write a digit (or `BLANK`) into a cell
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<(), PuzzleError> {
        if value as usize > SIZE {
            return Err(PuzzleError::InvalidDigit { row, col, value });
        }
        self.cells[row][col] = value;
        Ok(())
    }

    /// Pre-filled cells as `(row, col, digit)`
    pub fn givens(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|(_, value)| **value != BLANK)
                .map(move |(col, &value)| (row, col, value))
        })
    }

    pub fn given_count(&self) -> usize {
        self.givens().count()
    }

    pub fn blank_count(&self) -> usize {
        SIZE * SIZE - self.given_count()
    }

    /// Every cell holds a digit
    pub fn is_complete(&self) -> bool {
        self.blank_count() == 0
    }

    /// Row-major copy of the cells
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }
}

impl Default for SudokuGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for SudokuGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, values) in self.cells.iter().enumerate() {
            if row > 0 && row % BOX_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for (col, &value) in values.iter().enumerate() {
                if col > 0 && col % BOX_SIZE == 0 {
                    write!(f, "| ")?;
                }
                let symbol = if value == BLANK {
                    '.'
                } else {
                    char::from(b'0' + value)
                };
                write!(f, "{}", symbol)?;
                if col + 1 < SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = SudokuGrid::empty();
        assert_eq!(grid.blank_count(), 81);
        assert!(!grid.is_complete());
        assert_eq!(grid.givens().count(), 0);
    }

    #[test]
    fn test_from_rows_rejects_bad_dimensions() {
        let rows = vec![vec![0u8; 9]; 8];
        assert_eq!(
            SudokuGrid::from_rows(rows),
            Err(PuzzleError::RowCount { expected: 9, found: 8 })
        );

        let mut rows = vec![vec![0u8; 9]; 9];
        rows[4] = vec![0u8; 10];
        assert!(matches!(
            SudokuGrid::from_rows(rows),
            Err(PuzzleError::RowLength { row: 4, .. })
        ));
    }

    #[test]
    fn test_from_rows_rejects_out_of_range_digit() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[2][3] = 10;
        assert_eq!(
            SudokuGrid::from_rows(rows),
            Err(PuzzleError::InvalidDigit { row: 2, col: 3, value: 10 })
        );
    }

    #[test]
    fn test_givens() {
        let mut grid = SudokuGrid::empty();
        grid.set(0, 0, 5).unwrap();
        grid.set(8, 7, 1).unwrap();
        let givens: Vec<_> = grid.givens().collect();
        assert_eq!(givens, vec![(0, 0, 5), (8, 7, 1)]);
        assert_eq!(grid.blank_count(), 79);
    }

    #[test]
    fn test_display_uses_dots_for_blanks() {
        let grid = SudokuGrid::empty();
        let text = grid.to_string();
        assert!(text.starts_with(". . . | . . . | . . ."));
        assert_eq!(text.lines().count(), 11);
    }
}
