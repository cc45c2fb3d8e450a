//! File I/O operations for Sudoku grids

use super::grid::{SudokuGrid, BLANK, SIZE};
use crate::error::PuzzleError;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a Sudoku puzzle from a text file
/// Format: nine rows of nine cells, '1'-'9' for givens and '0', '.' or '_' for blanks
pub fn load_sudoku_from_file<P: AsRef<Path>>(path: P) -> Result<SudokuGrid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read sudoku file: {}", path.as_ref().display()))?;

    parse_sudoku(&content)
        .with_context(|| format!("Failed to parse sudoku from file: {}", path.as_ref().display()))
}

/// Parse a Sudoku grid from a string representation
///
/// Whitespace and `|` inside a row are ignored, lines starting with `-`, `+`
/// or `#` are skipped, and a single 81-cell line is accepted as well.
pub fn parse_sudoku(content: &str) -> Result<SudokuGrid, PuzzleError> {
    let mut rows: Vec<Vec<u8>> = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(['-', '+', '#']) {
            continue;
        }

        let row_idx = rows.len();
        let mut row = Vec::with_capacity(SIZE);
        for ch in line.chars() {
            match ch {
                '1'..='9' => row.push(ch as u8 - b'0'),
                '0' | '.' | '_' => row.push(BLANK),
                '|' => {}
                c if c.is_whitespace() => {}
                _ => {
                    return Err(PuzzleError::InvalidCharacter {
                        row: row_idx,
                        col: row.len(),
                        ch,
                    })
                }
            }
        }
        rows.push(row);
    }

    if rows.len() == 1 && rows[0].len() == SIZE * SIZE {
        let flat = rows.remove(0);
        rows = flat.chunks(SIZE).map(|chunk| chunk.to_vec()).collect();
    }

    SudokuGrid::from_rows(rows)
}

/// Convert a grid to its plain nine-line representation
pub fn sudoku_to_string(grid: &SudokuGrid) -> String {
    let mut result = String::with_capacity(SIZE * (SIZE + 1));

    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = grid.get(row, col);
            result.push(if value == BLANK { '.' } else { char::from(b'0' + value) });
        }
        result.push('\n');
    }

    result
}

/// Save a grid to a text file
pub fn save_sudoku_to_file<P: AsRef<Path>>(grid: &SudokuGrid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, sudoku_to_string(grid))
        .with_context(|| format!("Failed to write sudoku to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// A classic puzzle with a unique solution
pub const EXAMPLE_PUZZLE: &str = "\
53..7....
6..195...
.98....6.
8...6...3
4..8.3..1
7...2...6
.6....28.
...419..5
....8..79
";

/// The solution of [`EXAMPLE_PUZZLE`]
pub const EXAMPLE_SOLUTION: &str = "\
534678912
672195348
198342567
859761423
426853791
713924856
961537284
287419635
345286179
";

/// Create example puzzle files for testing
pub fn create_example_sudokus<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    std::fs::write(dir.join("classic.txt"), EXAMPLE_PUZZLE)
        .context("Failed to write classic.txt")?;

    std::fs::write(dir.join("solved.txt"), EXAMPLE_SOLUTION)
        .context("Failed to write solved.txt")?;

    // Two 5s in the first row: no solution
    let contradictory = EXAMPLE_PUZZLE.replacen("53..7....", "53..7...5", 1);
    std::fs::write(dir.join("contradictory.txt"), contradictory)
        .context("Failed to write contradictory.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_example() {
        let grid = parse_sudoku(EXAMPLE_PUZZLE).unwrap();
        assert_eq!(grid.get(0, 0), 5);
        assert_eq!(grid.get(0, 2), BLANK);
        assert_eq!(grid.get(8, 8), 9);
        assert_eq!(grid.given_count(), 30);
    }

    #[test]
    fn test_parse_decorated_grid() {
        let decorated = "\
# comment
5 3 . | . 7 . | . . .
6 . . | 1 9 5 | . . .
. 9 8 | . . . | . 6 .
------+-------+------
8 . . | . 6 . | . . 3
4 . . | 8 . 3 | . . 1
7 . . | . 2 . | . . 6
------+-------+------
. 6 . | . . . | 2 8 .
. . . | 4 1 9 | . . 5
. . . | . 8 . | . 7 9
";
        assert_eq!(
            parse_sudoku(decorated).unwrap(),
            parse_sudoku(EXAMPLE_PUZZLE).unwrap()
        );
    }

    #[test]
    fn test_parse_single_line() {
        let line: String = EXAMPLE_PUZZLE.lines().collect();
        assert_eq!(line.len(), 81);
        assert_eq!(parse_sudoku(&line).unwrap(), parse_sudoku(EXAMPLE_PUZZLE).unwrap());
    }

    #[test]
    fn test_invalid_input() {
        let bad_char = EXAMPLE_PUZZLE.replacen('7', "x", 1);
        assert!(matches!(
            parse_sudoku(&bad_char),
            Err(PuzzleError::InvalidCharacter { row: 0, col: 4, ch: 'x' })
        ));

        let short_row = EXAMPLE_PUZZLE.replacen("53..7....", "53..7...", 1);
        assert!(matches!(
            parse_sudoku(&short_row),
            Err(PuzzleError::RowLength { row: 0, .. })
        ));

        assert_eq!(parse_sudoku(""), Err(PuzzleError::EmptyGrid));
    }

    #[test]
    fn test_to_string_round_trip() {
        let grid = parse_sudoku(EXAMPLE_PUZZLE).unwrap();
        assert_eq!(sudoku_to_string(&grid), EXAMPLE_PUZZLE);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/puzzle.txt");

        let grid = parse_sudoku(EXAMPLE_SOLUTION).unwrap();
        save_sudoku_to_file(&grid, &file_path).unwrap();
        let loaded = load_sudoku_from_file(&file_path).unwrap();

        assert_eq!(grid, loaded);
        assert!(loaded.is_complete());
    }

    #[test]
    fn test_create_example_sudokus() {
        let temp_dir = tempdir().unwrap();
        create_example_sudokus(temp_dir.path()).unwrap();

        for name in ["classic.txt", "solved.txt", "contradictory.txt"] {
            let grid = load_sudoku_from_file(temp_dir.path().join(name)).unwrap();
            assert!(grid.given_count() >= 30);
        }
    }
}
