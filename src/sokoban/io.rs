//! File I/O operations for Sokoban levels

use super::level::{Level, Tile};
use crate::error::PuzzleError;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a level from a text file
/// Format: '#' wall, '.' or ' ' floor, 'P' agent, 'B' box, 'G' goal,
/// '*' box on goal, '+' agent on goal
pub fn load_level_from_file<P: AsRef<Path>>(path: P) -> Result<Level> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read level file: {}", path.as_ref().display()))?;

    parse_level(&content)
        .with_context(|| format!("Failed to parse level from file: {}", path.as_ref().display()))
}

/// Parse a level from its text form
///
/// Empty lines are dropped. A row of spaces is a row of floor, and rows
/// shorter than the widest row are padded with floor, so trailing whitespace
/// stripped by editors does not matter.
pub fn parse_level(content: &str) -> Result<Level, PuzzleError> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(PuzzleError::EmptyGrid);
    }

    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let mut tiles = Vec::with_capacity(lines.len());

    for (row, line) in lines.iter().enumerate() {
        let mut tile_row = Vec::with_capacity(width);
        for (col, ch) in line.chars().enumerate() {
            let tile = Tile::from_char(ch).ok_or(PuzzleError::InvalidCharacter { row, col, ch })?;
            tile_row.push(tile);
        }
        tile_row.resize(width, Tile::Floor);
        tiles.push(tile_row);
    }

    Level::from_tiles(&tiles)
}

/// Save a level to a text file
pub fn save_level_to_file<P: AsRef<Path>>(level: &Level, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, level.to_string())
        .with_context(|| format!("Failed to write level to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example level files for testing
pub fn create_example_levels<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Single push to the right
    let corridor = "#####\n#PBG#\n#####\n";
    std::fs::write(dir.join("corridor.txt"), corridor)
        .context("Failed to write corridor.txt")?;

    // Needs seven moves, routing around the box
    let room = "#######\n#P....#\n#..B..#\n#....G#\n#######\n";
    std::fs::write(dir.join("room.txt"), room)
        .context("Failed to write room.txt")?;

    // Two boxes, two goals
    let pair = "#######\n#.G.G.#\n#.B.B.#\n#..P..#\n#######\n";
    std::fs::write(dir.join("pair.txt"), pair)
        .context("Failed to write pair.txt")?;

    // Box wedged in a corner: never solvable
    let stuck = "######\n#B...#\n#...P#\n#...G#\n######\n";
    std::fs::write(dir.join("stuck.txt"), stuck)
        .context("Failed to write stuck.txt")?;

    Ok(())
}
