//! Turns a satisfying assignment back into a filled Sudoku grid

use super::grid::{SudokuGrid, BLANK, SIZE};
use super::variables::SudokuVariables;
use crate::sat::Model;
use anyhow::Result;

/// Decode a model produced for a Sudoku encoding
///
/// Every true variable inside the allocator's range writes its digit into the
/// grid. A model that leaves a cell blank or puts two digits in one cell does
/// not come from the encoding and is rejected.
pub fn decode_model(model: &Model, variables: &SudokuVariables) -> Result<SudokuGrid> {
    let mut grid = SudokuGrid::empty();

    for var in model.true_variables() {
        let Some((row, col, digit)) = variables.decode(var) else {
            continue;
        };
        let existing = grid.get(row, col);
        if existing != BLANK && existing != digit {
            anyhow::bail!(
                "Model assigns both {} and {} to cell ({}, {})",
                existing,
                digit,
                row,
                col
            );
        }
        grid.set(row, col, digit)?;
    }

    for row in 0..SIZE {
        for col in 0..SIZE {
            if grid.get(row, col) == BLANK {
                anyhow::bail!("Model leaves cell ({}, {}) without a digit", row, col);
            }
        }
    }

    Ok(grid)
}
