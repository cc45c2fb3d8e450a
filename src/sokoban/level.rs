//! Sokoban level representation

use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell address as `(row, col)`
pub type Position = (usize, usize);

/// The four agent moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed compass order used wherever directions are enumerated
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Row and column offset of one step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    /// The direction leading from `from` to the orthogonally adjacent `to`
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| {
            let (dr, dc) = dir.delta();
            from.0.checked_add_signed(dr) == Some(to.0) && from.1.checked_add_signed(dc) == Some(to.1)
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Render a move list as a compact string such as `"RRDL"`
pub fn moves_to_string(moves: &[Direction]) -> String {
    moves.iter().map(|dir| dir.symbol()).collect()
}

/// Parse a compact move string, ignoring whitespace and commas
pub fn parse_moves(text: &str) -> Result<Vec<Direction>, PuzzleError> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .enumerate()
        .map(|(i, c)| {
            Direction::from_symbol(c).ok_or(PuzzleError::InvalidCharacter { row: 0, col: i, ch: c })
        })
        .collect()
}

/// Contents of one input cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Agent,
    Box,
    Goal,
    BoxOnGoal,
    AgentOnGoal,
}

impl Tile {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Tile::Wall),
            '.' | ' ' => Some(Tile::Floor),
            'P' => Some(Tile::Agent),
            'B' => Some(Tile::Box),
            'G' => Some(Tile::Goal),
            '*' => Some(Tile::BoxOnGoal),
            '+' => Some(Tile::AgentOnGoal),
            _ => None,
        }
    }
}

/// A static Sokoban level: walls, goals and the starting positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub rows: usize,
    pub cols: usize,
    walls: Vec<bool>,
    pub goals: Vec<Position>,
    /// Starting cell of each box; the index is the box id
    pub boxes: Vec<Position>,
    pub agent: Position,
}

impl Level {
    /// Build a level from a rectangular tile matrix
    pub fn from_tiles(tiles: &[Vec<Tile>]) -> Result<Self, PuzzleError> {
        if tiles.is_empty() || tiles[0].is_empty() {
            return Err(PuzzleError::EmptyGrid);
        }

        let rows = tiles.len();
        let cols = tiles[0].len();
        let mut walls = vec![false; rows * cols];
        let mut goals = Vec::new();
        let mut boxes = Vec::new();
        let mut agent = None;

        for (row, line) in tiles.iter().enumerate() {
            if line.len() != cols {
                return Err(PuzzleError::RowLength {
                    row,
                    found: line.len(),
                    expected: cols,
                });
            }
            for (col, tile) in line.iter().enumerate() {
                let pos = (row, col);
                match tile {
                    Tile::Wall => walls[row * cols + col] = true,
                    Tile::Floor => {}
                    Tile::Box => boxes.push(pos),
                    Tile::Goal => goals.push(pos),
                    Tile::BoxOnGoal => {
                        boxes.push(pos);
                        goals.push(pos);
                    }
                    Tile::Agent | Tile::AgentOnGoal => {
                        if agent.is_some() {
                            return Err(PuzzleError::DuplicateAgent { row, col });
                        }
                        agent = Some(pos);
                        if *tile == Tile::AgentOnGoal {
                            goals.push(pos);
                        }
                    }
                }
            }
        }

        let agent = agent.ok_or(PuzzleError::MissingAgent)?;

        Ok(Self {
            rows,
            cols,
            walls,
            goals,
            boxes,
            agent,
        })
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls[pos.0 * self.cols + pos.1]
    }

    pub fn is_goal(&self, pos: Position) -> bool {
        self.goals.contains(&pos)
    }

    /// The cell one step from `pos`, `None` when it leaves the grid
    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = pos.0.checked_add_signed(dr)?;
        let col = pos.1.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// In-grid orthogonal neighbours, in compass order
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.step(pos, dir))
            .collect()
    }

    /// Whether `pos` is one of the four corners of the grid
    pub fn is_corner(&self, pos: Position) -> bool {
        (pos.0 == 0 || pos.0 == self.rows - 1) && (pos.1 == 0 || pos.1 == self.cols - 1)
    }

    /// Every cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
    }

    /// Every non-wall cell, row-major
    pub fn floor_cells(&self) -> Vec<Position> {
        self.cells().filter(|&pos| !self.is_wall(pos)).collect()
    }

    /// The starting snapshot
    pub fn initial_state(&self) -> Snapshot {
        Snapshot {
            agent: self.agent,
            boxes: self.boxes.clone(),
        }
    }

    /// Draw the level with the entities of `state` placed on it
    pub fn render(&self, state: &Snapshot) -> String {
        let mut output = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = (row, col);
                let goal = self.is_goal(pos);
                let ch = if self.is_wall(pos) {
                    '#'
                } else if state.agent == pos {
                    if goal { '+' } else { 'P' }
                } else if state.boxes.contains(&pos) {
                    if goal { '*' } else { 'B' }
                } else if goal {
                    'G'
                } else {
                    '.'
                };
                output.push(ch);
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&self.initial_state()))
    }
}

/// Positions of every entity at one time step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub agent: Position,
    pub boxes: Vec<Position>,
}

impl Snapshot {
    /// Every box rests on some goal
    pub fn is_solved(&self, level: &Level) -> bool {
        self.boxes.iter().all(|&pos| level.is_goal(pos))
    }

    pub fn box_at(&self, pos: Position) -> Option<usize> {
        self.boxes.iter().position(|&b| b == pos)
    }
}
