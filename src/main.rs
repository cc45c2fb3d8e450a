//! Main CLI application for the puzzle SAT solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use puzzle_sat::{
    config::{CliOverrides, OutputFormat, Settings},
    pipeline::{solve_directory, Outcome, PuzzleKind, SokobanProblem, SudokuProblem},
    sokoban::{create_example_levels, load_level_from_file, parse_moves, validate_plan},
    sudoku::create_example_sudokus,
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "puzzle_sat")]
#[command(about = "Sudoku and Sokoban SAT Solver")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a Sudoku puzzle
    Sudoku {
        /// Puzzle file: 9 lines of digits, '.' or '0' for blanks
        file: PathBuf,

        /// Solver timeout in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Save the solution into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Solve a Sokoban level
    Sokoban {
        /// Level file using # . P B G * + tiles
        file: PathBuf,

        /// First horizon to try (overrides config)
        #[arg(long)]
        horizon: Option<usize>,

        /// Largest horizon to try when deepening (overrides config)
        #[arg(long)]
        max_horizon: Option<usize>,

        /// Only try the first horizon
        #[arg(long)]
        no_deepen: bool,

        /// Solver timeout in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Save the solution into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the level after every move
        #[arg(long)]
        show_evolution: bool,
    },

    /// Solve every `.txt` puzzle in a directory
    Batch {
        directory: PathBuf,

        #[arg(short, long, value_enum)]
        kind: PuzzleKind,

        /// Write the report as JSON into this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Replay a move string on a level and report whether it solves it
    CheckMoves {
        level: PathBuf,

        /// Moves as a string over U, D, L, R
        moves: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Sudoku { file, timeout, format, output } => {
            let overrides = CliOverrides {
                timeout_seconds: timeout,
                format,
                output_dir: output,
                ..CliOverrides::default()
            };
            sudoku_command(&cli.config, &file, &overrides)
        }
        Commands::Sokoban {
            file,
            horizon,
            max_horizon,
            no_deepen,
            timeout,
            format,
            output,
            show_evolution,
        } => {
            let overrides = CliOverrides {
                horizon,
                max_horizon,
                no_deepen,
                timeout_seconds: timeout,
                format,
                output_dir: output,
            };
            sokoban_command(&cli.config, &file, &overrides, show_evolution)
        }
        Commands::Batch { directory, kind, report } => batch_command(&cli.config, &directory, kind, report),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::CheckMoves { level, moves } => check_moves_command(&level, &moves),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "puzzle".to_string())
}

fn sudoku_command(config_path: &Path, file: &Path, overrides: &CliOverrides) -> Result<()> {
    println!("{}", ColorOutput::info("Solving Sudoku..."));
    let settings = load_settings(config_path, overrides)?;

    let start_time = Instant::now();
    let problem = SudokuProblem::from_file(settings.clone(), file)?;
    let solution = match problem.solve()? {
        Outcome::Solved(solution) => solution,
        Outcome::Unsatisfiable => {
            println!("{}", ColorOutput::warning("No solution: the givens contradict each other"));
            return Ok(());
        }
    };

    println!(
        "{}",
        ColorOutput::success(&format!("Solved in {:.3}s", start_time.elapsed().as_secs_f64()))
    );
    match settings.output.format {
        OutputFormat::Text => println!("\n{}", SolutionFormatter::format_sudoku(&solution)),
        OutputFormat::Json => println!("{}", solution.to_json()?),
    }

    if settings.output.save {
        let path = SolutionFormatter::save_sudoku(
            &solution,
            &settings.output.output_directory,
            &file_stem(file),
            settings.output.format,
        )
        .context("Failed to save solution")?;
        println!("{}", ColorOutput::success(&format!("Solution saved to {}", path.display())));
    }

    Ok(())
}

fn sokoban_command(
    config_path: &Path,
    file: &Path,
    overrides: &CliOverrides,
    show_evolution: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Solving Sokoban..."));
    let settings = load_settings(config_path, overrides)?;

    let start_time = Instant::now();
    let problem = SokobanProblem::from_file(settings.clone(), file)?;
    let solution = match problem.solve()? {
        Outcome::Solved(solution) => solution,
        Outcome::Unsatisfiable => {
            let horizons = problem.horizons();
            let last = horizons.last().copied().unwrap_or(settings.sokoban.horizon);
            println!(
                "{}",
                ColorOutput::warning(&format!("No plan within {} time steps", last))
            );
            return Ok(());
        }
    };

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} moves in {:.3}s",
            solution.moves.len(),
            start_time.elapsed().as_secs_f64()
        ))
    );
    match settings.output.format {
        OutputFormat::Text => println!("\n{}", SolutionFormatter::format_sokoban(&solution, show_evolution)),
        OutputFormat::Json => println!("{}", solution.to_json()?),
    }

    if settings.output.save {
        let path = SolutionFormatter::save_sokoban(
            &solution,
            &settings.output.output_directory,
            &file_stem(file),
            settings.output.format,
        )
        .context("Failed to save solution")?;
        println!("{}", ColorOutput::success(&format!("Solution saved to {}", path.display())));
    }

    Ok(())
}

fn batch_command(config_path: &Path, directory: &Path, kind: PuzzleKind, report_path: Option<PathBuf>) -> Result<()> {
    println!(
        "{}",
        ColorOutput::info(&format!("Solving {:?} puzzles in {}", kind, directory.display()))
    );
    let settings = load_settings(config_path, &CliOverrides::default())?;

    let report = solve_directory(directory, kind, &settings)?;
    println!("\n{}", report);

    if let Some(path) = report_path {
        std::fs::write(&path, report.to_json()?)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("{}", ColorOutput::success(&format!("Report saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let sudoku_dir = directory.join("input/sudoku");
    let sokoban_dir = directory.join("input/sokoban");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &sudoku_dir, &sokoban_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_sudokus(&sudoku_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", sudoku_dir.display());

    create_example_levels(&sokoban_dir).context("Failed to create example levels")?;
    println!("Created example levels in: {}", sokoban_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut quick = Settings::default();
    quick.sokoban.horizon = 5;
    quick.sokoban.max_horizon = 15;
    quick.sokoban.horizon_step = 1;
    quick.solver.timeout_seconds = Some(30);
    quick.to_file(examples_dir.join("quick.yaml"))?;

    let mut exhaustive = Settings::default();
    exhaustive.sokoban.max_horizon = 120;
    exhaustive.solver.timeout_seconds = None;
    exhaustive.output.format = OutputFormat::Json;
    exhaustive.output.save = true;
    exhaustive.to_file(examples_dir.join("exhaustive.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Run: cargo run -- sudoku {}", sudoku_dir.join("classic.txt").display());
    println!("2. Run: cargo run -- sokoban {}", sokoban_dir.join("room.txt").display());

    Ok(())
}

fn check_moves_command(level_path: &Path, moves: &str) -> Result<()> {
    let level = load_level_from_file(level_path)?;
    let moves = parse_moves(moves)?;

    let result = validate_plan(&level, &moves);
    println!("{}", result);
    println!("{}", level.render(result.final_state()));

    if result.is_valid {
        println!("{}", ColorOutput::success("Moves solve the level"));
    } else {
        println!("{}", ColorOutput::error("Moves do not solve the level"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "puzzle_sat",
            "sokoban",
            "level.txt",
            "--horizon",
            "12",
            "--no-deepen",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Sokoban { horizon, no_deepen, .. } => {
                assert_eq!(horizon, Some(12));
                assert!(no_deepen);
            }
            _ => panic!("expected sokoban subcommand"),
        }

        let cli = Cli::try_parse_from(["puzzle_sat", "batch", "puzzles", "--kind", "sudoku"]).unwrap();
        assert!(matches!(cli.command, Commands::Batch { kind: PuzzleKind::Sudoku, .. }));

        assert!(Cli::try_parse_from(["puzzle_sat", "batch", "puzzles", "--kind", "chess"]).is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/quick.yaml").exists());
        assert!(temp_dir.path().join("input/sudoku/classic.txt").exists());
        assert!(temp_dir.path().join("input/sokoban/room.txt").exists());

        let quick = Settings::from_file(temp_dir.path().join("config/examples/quick.yaml")).unwrap();
        assert_eq!(quick.sokoban.horizon_step, 1);
    }

    #[test]
    fn test_solve_commands() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        let config = temp_dir.path().join("config/default.yaml");
        let out = temp_dir.path().join("out");

        let overrides = CliOverrides {
            format: Some(OutputFormat::Json),
            output_dir: Some(out.clone()),
            ..CliOverrides::default()
        };
        sudoku_command(&config, &temp_dir.path().join("input/sudoku/classic.txt"), &overrides).unwrap();
        assert!(out.join("classic.solution.json").exists());

        let overrides = CliOverrides {
            horizon: Some(1),
            no_deepen: true,
            output_dir: Some(out.clone()),
            ..CliOverrides::default()
        };
        sokoban_command(&config, &temp_dir.path().join("input/sokoban/corridor.txt"), &overrides, true).unwrap();
        assert!(out.join("corridor.solution.txt").exists());

        check_moves_command(&temp_dir.path().join("input/sokoban/corridor.txt"), "R").unwrap();
    }
}
