//! Solve every puzzle file in a directory in parallel

use super::problem::{SokobanProblem, SudokuProblem};
use super::solution::Outcome;
use crate::config::Settings;
use crate::sudoku::io::sudoku_to_string;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Which puzzle the files in a batch directory hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    Sudoku,
    Sokoban,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Solved,
    Unsatisfiable,
    Failed,
}

/// Result for one file of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub file: PathBuf,
    pub status: BatchStatus,
    /// Rendered solution, move string or error message
    pub detail: String,
    pub elapsed_ms: u64,
}

/// Per-file results of a batch run, sorted by file name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub kind: PuzzleKind,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn count(&self, status: BatchStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    pub fn entry(&self, file_name: &str) -> Option<&BatchEntry> {
        self.entries
            .iter()
            .find(|e| e.file.file_name().is_some_and(|name| name == file_name))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "File                     | Status        | Time(ms)")?;
        writeln!(f, "-------------------------|---------------|---------")?;
        for entry in &self.entries {
            let name = entry
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let status = match entry.status {
                BatchStatus::Solved => "solved",
                BatchStatus::Unsatisfiable => "unsatisfiable",
                BatchStatus::Failed => "failed",
            };
            writeln!(f, "{:24} | {:13} | {:8}", name, status, entry.elapsed_ms)?;
        }
        writeln!(
            f,
            "{} solved, {} unsatisfiable, {} failed",
            self.count(BatchStatus::Solved),
            self.count(BatchStatus::Unsatisfiable),
            self.count(BatchStatus::Failed)
        )
    }
}

/// Puzzle files (`*.txt`) directly inside `dir`, sorted
pub fn puzzle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn solve_one(path: &Path, kind: PuzzleKind, settings: &Settings) -> Result<(BatchStatus, String)> {
    let outcome = match kind {
        PuzzleKind::Sudoku => SudokuProblem::from_file(settings.clone(), path)?
            .solve()?
            .map(|solution| sudoku_to_string(&solution.grid)),
        PuzzleKind::Sokoban => SokobanProblem::from_file(settings.clone(), path)?
            .solve()?
            .map(|solution| solution.move_string()),
    };

    Ok(match outcome {
        Outcome::Solved(detail) => (BatchStatus::Solved, detail),
        Outcome::Unsatisfiable => (BatchStatus::Unsatisfiable, String::new()),
    })
}

/// Solve all puzzle files in `dir`; a file that fails to load or solve is reported, not fatal
pub fn solve_directory<P: AsRef<Path>>(dir: P, kind: PuzzleKind, settings: &Settings) -> Result<BatchReport> {
    let files = puzzle_files(dir)?;
    log::info!("Solving {} {:?} files", files.len(), kind);

    let entries = files
        .into_par_iter()
        .map(|file| {
            let start = Instant::now();
            let (status, detail) = match solve_one(&file, kind, settings) {
                Ok(result) => result,
                Err(e) => {
                    log::warn!("{}: {:#}", file.display(), e);
                    (BatchStatus::Failed, format!("{:#}", e))
                }
            };
            BatchEntry {
                file,
                status,
                detail,
                elapsed_ms: start.elapsed().as_millis() as u64,
            }
        })
        .collect();

    Ok(BatchReport { kind, entries })
}
