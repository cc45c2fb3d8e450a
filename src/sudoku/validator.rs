//! Independent checks for Sudoku grids, no SAT involved

use super::grid::{SudokuGrid, BLANK, BOX_SIZE, SIZE};

/// Result of validating a filled grid against its puzzle
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<RuleViolation>,
}

/// One broken Sudoku rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    BlankCell { row: usize, col: usize },
    DuplicateInRow { row: usize, digit: u8 },
    DuplicateInColumn { col: usize, digit: u8 },
    DuplicateInBox { box_row: usize, box_col: usize, digit: u8 },
    GivenChanged { row: usize, col: usize, given: u8, found: u8 },
}

/// Validates Sudoku solutions
#[derive(Debug, Clone, Copy, Default)]
pub struct SudokuValidator;

impl SudokuValidator {
    /// Check that `solution` is a complete valid grid that keeps every given of `puzzle`
    pub fn validate(solution: &SudokuGrid, puzzle: &SudokuGrid) -> ValidationResult {
        let mut violations = Vec::new();

        for row in 0..SIZE {
            for col in 0..SIZE {
                if solution.get(row, col) == BLANK {
                    violations.push(RuleViolation::BlankCell { row, col });
                }
            }
        }

        violations.extend(Self::find_duplicates(solution));

        for (row, col, given) in puzzle.givens() {
            let found = solution.get(row, col);
            if found != given {
                violations.push(RuleViolation::GivenChanged { row, col, given, found });
            }
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    /// Digits repeated within a row, column or box; blanks are ignored.
    ///
    /// On an unsolved puzzle a non-empty result means the givens already
    /// contradict each other.
    pub fn find_duplicates(grid: &SudokuGrid) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        for row in 0..SIZE {
            for digit in repeated((0..SIZE).map(|col| grid.get(row, col))) {
                violations.push(RuleViolation::DuplicateInRow { row, digit });
            }
        }

        for col in 0..SIZE {
            for digit in repeated((0..SIZE).map(|row| grid.get(row, col))) {
                violations.push(RuleViolation::DuplicateInColumn { col, digit });
            }
        }

        for box_row in (0..SIZE).step_by(BOX_SIZE) {
            for box_col in (0..SIZE).step_by(BOX_SIZE) {
                let cells = (box_row..box_row + BOX_SIZE).flat_map(|row| {
                    (box_col..box_col + BOX_SIZE).map(move |col| grid.get(row, col))
                });
                for digit in repeated(cells) {
                    violations.push(RuleViolation::DuplicateInBox {
                        box_row,
                        box_col,
                        digit,
                    });
                }
            }
        }

        violations
    }
}

/// Non-blank digits that occur more than once
fn repeated<I: Iterator<Item = u8>>(values: I) -> Vec<u8> {
    let mut counts = [0usize; SIZE + 1];
    for value in values {
        counts[value as usize] += 1;
    }
    (1..=SIZE as u8)
        .filter(|&digit| counts[digit as usize] > 1)
        .collect()
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleViolation::BlankCell { row, col } => {
                write!(f, "cell ({}, {}) is blank", row, col)
            }
            RuleViolation::DuplicateInRow { row, digit } => {
                write!(f, "digit {} repeats in row {}", digit, row)
            }
            RuleViolation::DuplicateInColumn { col, digit } => {
                write!(f, "digit {} repeats in column {}", digit, col)
            }
            RuleViolation::DuplicateInBox { box_row, box_col, digit } => {
                write!(f, "digit {} repeats in box at ({}, {})", digit, box_row, box_col)
            }
            RuleViolation::GivenChanged { row, col, given, found } => {
                write!(f, "given {} at ({}, {}) became {}", given, row, col, found)
            }
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;
        for violation in self.violations.iter().take(5) {
            writeln!(f, "  - {}", violation)?;
        }
        if self.violations.len() > 5 {
            writeln!(f, "  ... and {} more", self.violations.len() - 5)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved() -> SudokuGrid {
        let rows = (0..SIZE)
            .map(|r| {
                (0..SIZE)
                    .map(|c| ((r * 3 + r / 3 + c) % SIZE) as u8 + 1)
                    .collect()
            })
            .collect();
        SudokuGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_valid_solution() {
        let grid = solved();
        let result = SudokuValidator::validate(&grid, &grid);
        assert!(result.is_valid, "{}", result);
    }

    #[test]
    fn test_swapped_cells_are_detected() {
        let mut grid = solved();
        let a = grid.get(0, 0);
        let b = grid.get(0, 1);
        grid.set(0, 0, b).unwrap();
        let result = SudokuValidator::validate(&grid, &SudokuGrid::empty());
        assert!(!result.is_valid);
        assert!(result
            .violations
            .contains(&RuleViolation::DuplicateInRow { row: 0, digit: b }));
        assert!(!result
            .violations
            .iter()
            .any(|v| matches!(v, RuleViolation::DuplicateInRow { digit, .. } if *digit == a)));
    }

    #[test]
    fn test_changed_given() {
        let grid = solved();
        let mut puzzle = SudokuGrid::empty();
        let other = grid.get(5, 5) % 9 + 1;
        puzzle.set(5, 5, other).unwrap();
        let result = SudokuValidator::validate(&grid, &puzzle);
        assert!(!result.is_valid);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn test_conflicting_givens() {
        let mut puzzle = SudokuGrid::empty();
        puzzle.set(0, 0, 4).unwrap();
        puzzle.set(0, 8, 4).unwrap();
        let duplicates = SudokuValidator::find_duplicates(&puzzle);
        assert_eq!(duplicates, vec![RuleViolation::DuplicateInRow { row: 0, digit: 4 }]);
    }

    #[test]
    fn test_blank_cells_reported() {
        let result = SudokuValidator::validate(&SudokuGrid::empty(), &SudokuGrid::empty());
        assert_eq!(result.violations.len(), 81);
    }
}
