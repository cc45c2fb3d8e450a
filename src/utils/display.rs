//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::pipeline::{SokobanSolution, SudokuSolution};
use crate::sudoku::io::sudoku_to_string;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a solved Sudoku for console output
    pub fn format_sudoku(solution: &SudokuSolution) -> String {
        let mut output = String::new();

        output.push_str("=== Sudoku Solution ===\n");
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
        output.push_str(&format!(
            "Encoding: {} variables, {} clauses\n",
            solution.variables, solution.clauses
        ));
        output.push_str(&format!("Givens: {}\n\n", solution.puzzle.given_count()));
        output.push_str(&solution.grid.to_string());

        output
    }

    /// Format a solved Sokoban level for console output
    pub fn format_sokoban(solution: &SokobanSolution, show_evolution: bool) -> String {
        let mut output = String::new();

        output.push_str("=== Sokoban Solution ===\n");
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
        output.push_str(&format!(
            "Horizon: {} ({} attempt{})\n",
            solution.horizon,
            solution.attempts,
            if solution.attempts == 1 { "" } else { "s" }
        ));
        output.push_str(&format!(
            "Encoding: {} variables, {} clauses\n",
            solution.variables, solution.clauses
        ));
        output.push_str(&format!("Moves ({}): {}\n\n", solution.moves.len(), solution.move_string()));

        if show_evolution {
            output.push_str(&solution.format_evolution());
        } else {
            output.push_str(&solution.level.to_string());
        }

        output
    }

    /// Write a Sudoku solution into `output_dir` as `<stem>.solution.{txt,json}`
    pub fn save_sudoku<P: AsRef<Path>>(
        solution: &SudokuSolution,
        output_dir: P,
        stem: &str,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.solution.txt", stem));
                std::fs::write(&path, sudoku_to_string(&solution.grid))?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.solution.json", stem));
                solution.save_to_file(&path)?;
                path
            }
        };

        Ok(path)
    }

    /// Write a Sokoban solution into `output_dir` as `<stem>.solution.{txt,json}`
    pub fn save_sokoban<P: AsRef<Path>>(
        solution: &SokobanSolution,
        output_dir: P,
        stem: &str,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.solution.txt", stem));
                std::fs::write(&path, Self::format_sokoban(solution, true))?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.solution.json", stem));
                solution.save_to_file(&path)?;

                let summary_path = output_dir.join(format!("{}.summary.json", stem));
                std::fs::write(summary_path, serde_json::to_string_pretty(&solution.summary())?)?;
                path
            }
        };

        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
