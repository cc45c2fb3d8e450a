//! Puzzle problems: load, encode, solve, decode, validate

use super::solution::{Outcome, SokobanSolution, SudokuSolution};
use crate::config::Settings;
use crate::sat::{solve_clause_set, SolveOutcome, SolverOptions};
use crate::sokoban::{self, validate_plan, Level, SokobanEncoder};
use crate::sudoku::{self, EncodingOptions, SudokuEncoder, SudokuGrid, SudokuValidator};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

fn solver_options(settings: &Settings) -> SolverOptions {
    SolverOptions {
        timeout: settings.timeout(),
    }
}

/// A single Sudoku instance with the settings to solve it under
pub struct SudokuProblem {
    settings: Settings,
    puzzle: SudokuGrid,
}

impl SudokuProblem {
    pub fn new(settings: Settings, puzzle: SudokuGrid) -> Self {
        Self { settings, puzzle }
    }

    /// Load the puzzle from a text file
    pub fn from_file<P: AsRef<Path>>(settings: Settings, path: P) -> Result<Self> {
        let puzzle = sudoku::load_sudoku_from_file(path).context("Failed to load Sudoku puzzle")?;
        Ok(Self::new(settings, puzzle))
    }

    pub fn puzzle(&self) -> &SudokuGrid {
        &self.puzzle
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn encoding_options(&self) -> EncodingOptions {
        EncodingOptions {
            cell_coverage: self.settings.sudoku.cell_coverage,
        }
    }

    /// Get encoding statistics without solving
    pub fn encoding_statistics(&self) -> sudoku::encoder::EncodingStatistics {
        let encoder = SudokuEncoder::new(&self.puzzle, self.encoding_options());
        let clauses = encoder.encode();
        encoder.statistics(&clauses)
    }

    /// Solve the puzzle; `Unsatisfiable` when the givens admit no completion
    pub fn solve(&self) -> Result<Outcome<SudokuSolution>> {
        let start_time = Instant::now();
        log::info!(
            "Solving Sudoku with {} givens and {} blanks",
            self.puzzle.given_count(),
            self.puzzle.blank_count()
        );

        let encoder = SudokuEncoder::new(&self.puzzle, self.encoding_options());
        let clauses = encoder.encode();
        log::debug!("{}", encoder.statistics(&clauses));

        let outcome = solve_clause_set(&clauses, &solver_options(&self.settings))
            .context("SAT solving failed")?;

        let solution = match outcome {
            SolveOutcome::Unsatisfiable { solve_time } => {
                log::info!("No solution found in {:.3}s", solve_time.as_secs_f64());
                return Ok(Outcome::Unsatisfiable);
            }
            SolveOutcome::Satisfiable(solution) => solution,
        };

        let grid = sudoku::decode_model(&solution.model, encoder.variables())?;
        let validation = SudokuValidator::validate(&grid, &self.puzzle);
        if !validation.is_valid {
            anyhow::bail!("Decoded grid breaks the rules: {}", validation);
        }

        log::info!(
            "Solved in {:.3}s ({:.3}s total)",
            solution.solve_time.as_secs_f64(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Outcome::Solved(SudokuSolution {
            puzzle: self.puzzle.clone(),
            grid,
            variables: encoder.variables().max_variable() as usize,
            clauses: clauses.len(),
            solve_time: solution.solve_time,
        }))
    }
}

/// A single Sokoban level with the settings to solve it under
pub struct SokobanProblem {
    settings: Settings,
    level: Level,
}

impl SokobanProblem {
    pub fn new(settings: Settings, level: Level) -> Self {
        Self { settings, level }
    }

    /// Load the level from a text file
    pub fn from_file<P: AsRef<Path>>(settings: Settings, path: P) -> Result<Self> {
        let level = sokoban::load_level_from_file(path).context("Failed to load Sokoban level")?;
        Ok(Self::new(settings, level))
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Horizons tried in order: the configured one, then larger ones when deepening
    pub fn horizons(&self) -> Vec<usize> {
        let config = &self.settings.sokoban;
        if !config.deepen || config.horizon_step == 0 {
            return vec![config.horizon];
        }

        let mut horizons = vec![config.horizon];
        let mut current = config.horizon;
        while current < config.max_horizon {
            current = (current + config.horizon_step).min(config.max_horizon);
            horizons.push(current);
        }
        horizons
    }

    /// Get encoding statistics for one horizon without solving
    pub fn encoding_statistics(&self, horizon: usize) -> Result<sokoban::encoder::EncodingStatistics> {
        let encoder = SokobanEncoder::new(&self.level, horizon)?;
        let clauses = encoder.encode();
        Ok(encoder.statistics(&clauses))
    }

    /// Solve with exactly `horizon` time steps
    pub fn solve_with_horizon(&self, horizon: usize) -> Result<Outcome<SokobanSolution>> {
        let encoder = SokobanEncoder::new(&self.level, horizon)?;
        let clauses = encoder.encode();
        log::debug!("{}", encoder.statistics(&clauses));

        let outcome = solve_clause_set(&clauses, &solver_options(&self.settings))
            .with_context(|| format!("SAT solving failed at horizon {}", horizon))?;

        let solution = match outcome {
            SolveOutcome::Unsatisfiable { solve_time } => {
                log::info!(
                    "Horizon {}: no plan ({:.3}s)",
                    horizon,
                    solve_time.as_secs_f64()
                );
                return Ok(Outcome::Unsatisfiable);
            }
            SolveOutcome::Satisfiable(solution) => solution,
        };

        let plan = sokoban::decode_model(&solution.model, encoder.variables(), &self.level)?;

        let replay = validate_plan(&self.level, &plan.moves);
        if !replay.is_valid {
            anyhow::bail!("Decoded plan does not solve the level: {}", replay);
        }

        log::info!(
            "Horizon {}: found {} moves in {:.3}s",
            horizon,
            plan.moves.len(),
            solution.solve_time.as_secs_f64()
        );

        Ok(Outcome::Solved(SokobanSolution {
            level: self.level.clone(),
            horizon,
            moves: plan.moves,
            trajectory: plan.trajectory,
            attempts: 1,
            variables: encoder.variables().max_variable() as usize,
            clauses: clauses.len(),
            solve_time: solution.solve_time,
        }))
    }

    /// Solve, lengthening the horizon after each unsatisfiable attempt if enabled
    pub fn solve(&self) -> Result<Outcome<SokobanSolution>> {
        log::info!(
            "Solving {}x{} Sokoban level with {} boxes",
            self.level.rows,
            self.level.cols,
            self.level.box_count()
        );

        let start_time = Instant::now();
        for (attempt, horizon) in self.horizons().into_iter().enumerate() {
            if let Outcome::Solved(mut solution) = self.solve_with_horizon(horizon)? {
                solution.attempts = attempt + 1;
                return Ok(Outcome::Solved(solution));
            }
        }

        log::info!(
            "No plan within horizon {} ({:.3}s)",
            self.settings.sokoban.max_horizon.max(self.settings.sokoban.horizon),
            start_time.elapsed().as_secs_f64()
        );
        Ok(Outcome::Unsatisfiable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sokoban::{parse_level, Direction};
    use crate::sudoku::io::{parse_sudoku, EXAMPLE_PUZZLE, EXAMPLE_SOLUTION};

    const ROOM: &str = "#######\n#P....#\n#..B..#\n#....G#\n#######\n";

    fn sokoban_settings(horizon: usize, deepen: bool) -> Settings {
        let mut settings = Settings::default();
        settings.sokoban.horizon = horizon;
        settings.sokoban.deepen = deepen;
        settings.sokoban.max_horizon = horizon.max(12);
        settings.sokoban.horizon_step = 1;
        settings
    }

    #[test]
    fn test_sudoku_unique_solution() {
        let puzzle = parse_sudoku(EXAMPLE_PUZZLE).unwrap();
        let problem = SudokuProblem::new(Settings::default(), puzzle.clone());

        let solution = problem.solve().unwrap().into_solved().unwrap();
        assert_eq!(solution.grid, parse_sudoku(EXAMPLE_SOLUTION).unwrap());
        assert!(SudokuValidator::validate(&solution.grid, &puzzle).is_valid);
        assert_eq!(solution.variables, 729);
    }

    #[test]
    fn test_sudoku_unique_solutions_across_difficulties() {
        // (puzzle, its only solution); the last two have 17 givens
        let cases = [
            (
                "003020600900305001001806400008102900700000008006708200002609500800203009005010300",
                "483921657967345821251876493548132976729564138136798245372689514814253769695417382",
            ),
            (
                "000000010400000000020000000000050407008000300001090000300400200050100000000806000",
                "693784512487512936125963874932651487568247391741398625319475268856129743274836159",
            ),
            (
                "400000805030000000000700000020000060000080400000010000000603070500200000104000000",
                "417369825632158947958724316825437169791586432346912758289643571573291684164875293",
            ),
        ];

        for (puzzle_text, solution_text) in cases {
            let puzzle = parse_sudoku(puzzle_text).unwrap();
            let problem = SudokuProblem::new(Settings::default(), puzzle.clone());

            let solution = problem.solve().unwrap().into_solved().unwrap();
            let validation = SudokuValidator::validate(&solution.grid, &puzzle);
            assert!(validation.is_valid, "{}", validation);
            assert_eq!(solution.grid, parse_sudoku(solution_text).unwrap());
        }
    }

    #[test]
    fn test_sudoku_complete_grid_is_returned_unchanged() {
        let grid = parse_sudoku(EXAMPLE_SOLUTION).unwrap();
        let problem = SudokuProblem::new(Settings::default(), grid.clone());

        let solution = problem.solve().unwrap().into_solved().unwrap();
        assert_eq!(solution.grid, grid);
    }

    #[test]
    fn test_sudoku_without_cell_coverage() {
        let mut settings = Settings::default();
        settings.sudoku.cell_coverage = false;
        let problem = SudokuProblem::new(settings, parse_sudoku(EXAMPLE_PUZZLE).unwrap());

        let with = SudokuProblem::new(Settings::default(), problem.puzzle().clone());
        assert_eq!(
            with.encoding_statistics().total_clauses - problem.encoding_statistics().total_clauses,
            81
        );
        assert!(problem.solve().unwrap().is_solved());
    }

    #[test]
    fn test_sudoku_contradictory_givens() {
        let mut puzzle = parse_sudoku(EXAMPLE_PUZZLE).unwrap();
        puzzle.set(0, 8, 5).unwrap();
        let problem = SudokuProblem::new(Settings::default(), puzzle);

        assert!(!problem.solve().unwrap().is_solved());
    }

    #[test]
    fn test_sokoban_corridor() {
        let level = parse_level("#####\n#PBG#\n#####").unwrap();
        let problem = SokobanProblem::new(sokoban_settings(1, false), level);

        let solution = problem.solve().unwrap().into_solved().unwrap();
        assert_eq!(solution.moves, vec![Direction::Right]);
        assert_eq!(solution.trajectory.len(), 2);
    }

    #[test]
    fn test_sokoban_room_fixed_horizon() {
        let level = parse_level(ROOM).unwrap();
        let problem = SokobanProblem::new(sokoban_settings(10, false), level.clone());

        let solution = problem.solve().unwrap().into_solved().unwrap();
        assert!(solution.moves.len() >= 7 && solution.moves.len() <= 10);
        assert_eq!(solution.trajectory.len(), 11);
        assert!(validate_plan(&level, &solution.moves).is_valid);
    }

    #[test]
    fn test_sokoban_room_short_horizon_unsat() {
        let level = parse_level(ROOM).unwrap();
        let problem = SokobanProblem::new(sokoban_settings(3, false), level);

        assert!(!problem.solve().unwrap().is_solved());
    }

    #[test]
    fn test_sokoban_deepening_finds_shortest_horizon() {
        let level = parse_level(ROOM).unwrap();
        let problem = SokobanProblem::new(sokoban_settings(2, true), level);

        let solution = problem.solve().unwrap().into_solved().unwrap();
        assert_eq!(solution.horizon, 7);
        assert_eq!(solution.moves.len(), 7);
        assert_eq!(solution.attempts, 6);
    }

    #[test]
    fn test_sokoban_corner_level_unsat() {
        let level = parse_level("######\n#B...#\n#...P#\n#...G#\n######").unwrap();
        let problem = SokobanProblem::new(sokoban_settings(4, true), level);

        assert!(!problem.solve().unwrap().is_solved());
    }

    #[test]
    fn test_sokoban_already_solved_at_zero_horizon() {
        let level = parse_level("#####\n#P.*#\n#####").unwrap();
        let problem = SokobanProblem::new(sokoban_settings(0, false), level);

        let solution = problem.solve().unwrap().into_solved().unwrap();
        assert!(solution.moves.is_empty());
        assert_eq!(solution.trajectory.len(), 1);
    }

    #[test]
    fn test_sokoban_box_without_goal_unsat() {
        let level = parse_level("#####\n#PB.#\n#####").unwrap();
        let problem = SokobanProblem::new(sokoban_settings(3, false), level);

        assert!(!problem.solve().unwrap().is_solved());
    }

    #[test]
    fn test_sokoban_two_boxes() {
        let level = parse_level("#######\n#.G.G.#\n#.B.B.#\n#..P..#\n#######").unwrap();
        let problem = SokobanProblem::new(sokoban_settings(8, true), level.clone());

        let solution = problem.solve().unwrap().into_solved().unwrap();
        let replay = validate_plan(&level, &solution.moves);
        assert!(replay.is_valid, "{}", replay);
        assert!(replay.final_state().boxes.iter().all(|&b| level.is_goal(b)));
    }

    #[test]
    fn test_horizon_schedule() {
        let mut settings = Settings::default();
        settings.sokoban.horizon = 10;
        settings.sokoban.max_horizon = 22;
        settings.sokoban.horizon_step = 5;
        let level = parse_level("#####\n#PBG#\n#####").unwrap();

        let problem = SokobanProblem::new(settings.clone(), level.clone());
        assert_eq!(problem.horizons(), vec![10, 15, 20, 22]);

        settings.sokoban.deepen = false;
        let problem = SokobanProblem::new(settings, level);
        assert_eq!(problem.horizons(), vec![10]);
    }
}
