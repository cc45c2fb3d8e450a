//! Variable addressing for the Sudoku encoding
//!
//! The proposition "cell (row, col) holds digit" is mapped to
//! `((row * 9 + col) * 9 + (digit - 1)) + 1`, which is dense over `1..=729`
//! and inverted by division and remainder.

use super::grid::SIZE;

/// Closed-form variable allocator for 9x9 Sudoku
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SudokuVariables;

impl SudokuVariables {
    pub fn new() -> Self {
        Self
    }

    /// Variable for "cell (row, col) holds `digit`" with `digit` in 1..=9
    #[inline]
    pub fn cell_digit(&self, row: usize, col: usize, digit: u8) -> i32 {
        debug_assert!(row < SIZE && col < SIZE);
        debug_assert!(digit >= 1 && digit as usize <= SIZE);
        (((row * SIZE + col) * SIZE + (digit as usize - 1)) + 1) as i32
    }

    /// Recover `(row, col, digit)` from a variable, `None` outside the range
    pub fn decode(&self, var: i32) -> Option<(usize, usize, u8)> {
        if var < 1 || var > self.max_variable() {
            return None;
        }
        let index = (var - 1) as usize;
        let digit = (index % SIZE) as u8 + 1;
        let cell = index / SIZE;
        Some((cell / SIZE, cell % SIZE, digit))
    }

    /// Largest variable the encoding can produce
    pub fn max_variable(&self) -> i32 {
        (SIZE * SIZE * SIZE) as i32
    }

    /// The nine digit variables of one cell
    pub fn cell_variables(&self, row: usize, col: usize) -> Vec<i32> {
        (1..=SIZE as u8)
            .map(|digit| self.cell_digit(row, col, digit))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_values() {
        let vars = SudokuVariables::new();
        assert_eq!(vars.cell_digit(0, 0, 1), 1);
        assert_eq!(vars.cell_digit(0, 0, 9), 9);
        assert_eq!(vars.cell_digit(0, 1, 1), 10);
        assert_eq!(vars.cell_digit(8, 8, 9), 729);
    }

    #[test]
    fn test_injective_and_invertible() {
        let vars = SudokuVariables::new();
        let mut seen = HashSet::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                for digit in 1..=SIZE as u8 {
                    let var = vars.cell_digit(row, col, digit);
                    assert!(var >= 1 && var <= vars.max_variable());
                    assert!(seen.insert(var), "collision at {:?}", (row, col, digit));
                    assert_eq!(vars.decode(var), Some((row, col, digit)));
                }
            }
        }
        assert_eq!(seen.len(), 729);
    }

    #[test]
    fn test_decode_out_of_range() {
        let vars = SudokuVariables::new();
        assert_eq!(vars.decode(0), None);
        assert_eq!(vars.decode(-5), None);
        assert_eq!(vars.decode(730), None);
    }

    #[test]
    fn test_cell_variables() {
        let vars = SudokuVariables::new();
        let cell = vars.cell_variables(3, 4);
        assert_eq!(cell.len(), 9);
        assert!(cell.windows(2).all(|w| w[1] == w[0] + 1));
    }
}
