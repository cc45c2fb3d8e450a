//! Constraint generation for the Sudoku SAT encoding

use super::grid::{SudokuGrid, BOX_SIZE, SIZE};
use super::variables::SudokuVariables;
use crate::sat::{Clause, ClauseSet};

/// Toggles for optional clause families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingOptions {
    /// Also emit "each cell holds at least one digit". Implied by the
    /// row/column/box coverage clauses, so purely redundant.
    pub cell_coverage: bool,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self { cell_coverage: true }
    }
}

/// Generates the CNF for one Sudoku instance
#[derive(Debug)]
pub struct SudokuEncoder<'a> {
    puzzle: &'a SudokuGrid,
    variables: SudokuVariables,
    options: EncodingOptions,
}

impl<'a> SudokuEncoder<'a> {
    pub fn new(puzzle: &'a SudokuGrid, options: EncodingOptions) -> Self {
        Self {
            puzzle,
            variables: SudokuVariables::new(),
            options,
        }
    }

    /// The allocator shared with the decoder
    pub fn variables(&self) -> &SudokuVariables {
        &self.variables
    }

    /// Generate all constraints for the puzzle
    pub fn encode(&self) -> ClauseSet {
        let mut clauses = ClauseSet::new();

        self.generate_row_constraints(&mut clauses);
        self.generate_column_constraints(&mut clauses);
        self.generate_box_constraints(&mut clauses);
        self.generate_given_constraints(&mut clauses);
        self.generate_cell_constraints(&mut clauses);

        clauses
    }

    /// Every digit appears somewhere in every row
    fn generate_row_constraints(&self, clauses: &mut ClauseSet) {
        for row in 0..SIZE {
            for digit in digits() {
                let vars: Vec<i32> = (0..SIZE)
                    .map(|col| self.variables.cell_digit(row, col, digit))
                    .collect();
                clauses.at_least_one(&vars);
            }
        }
    }

    /// Every digit appears somewhere in every column
    fn generate_column_constraints(&self, clauses: &mut ClauseSet) {
        for col in 0..SIZE {
            for digit in digits() {
                let vars: Vec<i32> = (0..SIZE)
                    .map(|row| self.variables.cell_digit(row, col, digit))
                    .collect();
                clauses.at_least_one(&vars);
            }
        }
    }

    /// Every digit appears somewhere in every 3x3 box
    fn generate_box_constraints(&self, clauses: &mut ClauseSet) {
        for box_row in (0..SIZE).step_by(BOX_SIZE) {
            for box_col in (0..SIZE).step_by(BOX_SIZE) {
                for digit in digits() {
                    let mut vars = Vec::with_capacity(SIZE);
                    for row in box_row..box_row + BOX_SIZE {
                        for col in box_col..box_col + BOX_SIZE {
                            vars.push(self.variables.cell_digit(row, col, digit));
                        }
                    }
                    clauses.at_least_one(&vars);
                }
            }
        }
    }

    /// Pre-filled cells are fixed
    fn generate_given_constraints(&self, clauses: &mut ClauseSet) {
        for (row, col, digit) in self.puzzle.givens() {
            clauses.push(Clause::unit(self.variables.cell_digit(row, col, digit)));
        }
    }

    /// No cell holds two digits
    fn generate_cell_constraints(&self, clauses: &mut ClauseSet) {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let vars = self.variables.cell_variables(row, col);
                if self.options.cell_coverage {
                    clauses.exactly_one(&vars);
                } else {
                    clauses.at_most_one(&vars);
                }
            }
        }
    }

    /// Get constraint generation statistics
    pub fn statistics(&self, clauses: &ClauseSet) -> EncodingStatistics {
        EncodingStatistics {
            givens: self.puzzle.given_count(),
            total_variables: self.variables.max_variable() as usize,
            total_clauses: clauses.len(),
        }
    }
}

fn digits() -> impl Iterator<Item = u8> {
    1..=SIZE as u8
}

/// Statistics about the Sudoku encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub givens: usize,
    pub total_variables: usize,
    pub total_clauses: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sudoku Encoding Statistics:")?;
        writeln!(f, "  Givens: {}", self.givens)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Row, column and box coverage (81 clauses each) plus 36 pairs per cell.
    const BASE_CLAUSES: usize = 3 * 81 + 81 * 36;

    #[test]
    fn test_clause_count_without_givens() {
        let grid = SudokuGrid::empty();
        let encoder = SudokuEncoder::new(&grid, EncodingOptions { cell_coverage: false });
        let clauses = encoder.encode();
        assert_eq!(clauses.len(), BASE_CLAUSES);
        assert_eq!(clauses.max_variable(), 729);
    }

    #[test]
    fn test_cell_coverage_adds_one_clause_per_cell() {
        let grid = SudokuGrid::empty();
        let encoder = SudokuEncoder::new(&grid, EncodingOptions::default());
        assert_eq!(encoder.encode().len(), BASE_CLAUSES + 81);
    }

    #[test]
    fn test_givens_become_unit_clauses() {
        let mut grid = SudokuGrid::empty();
        grid.set(0, 0, 5).unwrap();
        grid.set(4, 6, 2).unwrap();
        let encoder = SudokuEncoder::new(&grid, EncodingOptions::default());
        let clauses = encoder.encode();

        let vars = encoder.variables();
        let units: Vec<&Clause> = clauses.clauses().iter().filter(|c| c.is_unit()).collect();
        assert_eq!(units.len(), 2);
        assert!(units.contains(&&Clause::unit(vars.cell_digit(0, 0, 5))));
        assert!(units.contains(&&Clause::unit(vars.cell_digit(4, 6, 2))));
    }

    #[test]
    fn test_box_clause_covers_box_cells() {
        let grid = SudokuGrid::empty();
        let encoder = SudokuEncoder::new(&grid, EncodingOptions::default());
        let mut clauses = ClauseSet::new();
        encoder.generate_box_constraints(&mut clauses);
        assert_eq!(clauses.len(), 81);

        let vars = encoder.variables();
        // Middle box, digit 7.
        let expected: Vec<i32> = (3..6)
            .flat_map(|r| (3..6).map(move |c| (r, c)))
            .map(|(r, c)| vars.cell_digit(r, c, 7))
            .collect();
        assert!(clauses.clauses().iter().any(|c| c.literals == expected));
    }

    #[test]
    fn test_statistics() {
        let mut grid = SudokuGrid::empty();
        grid.set(1, 1, 1).unwrap();
        let encoder = SudokuEncoder::new(&grid, EncodingOptions::default());
        let clauses = encoder.encode();
        let stats = encoder.statistics(&clauses);
        assert_eq!(stats.givens, 1);
        assert_eq!(stats.total_variables, 729);
        assert_eq!(stats.total_clauses, clauses.len());
    }
}
