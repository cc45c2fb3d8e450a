//! Configuration settings for the puzzle solvers

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub sudoku: SudokuConfig,
    pub sokoban: SokobanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Give up on a single SAT call after this many seconds
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SudokuConfig {
    /// Emit the redundant at-least-one-digit clause for every cell
    pub cell_coverage: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SokobanConfig {
    /// Number of time steps encoded on the first attempt
    pub horizon: usize,
    /// Retry with longer horizons after an unsatisfiable attempt
    pub deepen: bool,
    /// Largest horizon tried when deepening
    pub max_horizon: usize,
    /// Horizon increment between attempts
    pub horizon_step: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Write solutions to `output_directory` in addition to printing them
    pub save: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                timeout_seconds: Some(300),
            },
            sudoku: SudokuConfig {
                cell_coverage: true,
            },
            sokoban: SokobanConfig {
                horizon: 10,
                deepen: true,
                max_horizon: 40,
                horizon_step: 5,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save: false,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::warn!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.timeout_seconds == Some(0) {
            anyhow::bail!("Solver timeout must be positive");
        }

        if self.sokoban.deepen {
            if self.sokoban.horizon_step == 0 {
                anyhow::bail!("Horizon step must be positive when deepening");
            }
            if self.sokoban.max_horizon < self.sokoban.horizon {
                anyhow::bail!(
                    "Maximum horizon {} is below the initial horizon {}",
                    self.sokoban.max_horizon,
                    self.sokoban.horizon
                );
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(horizon) = cli_overrides.horizon {
            self.sokoban.horizon = horizon;
            if self.sokoban.max_horizon < horizon {
                self.sokoban.max_horizon = horizon;
            }
        }
        if let Some(max_horizon) = cli_overrides.max_horizon {
            self.sokoban.max_horizon = max_horizon;
        }
        if cli_overrides.no_deepen {
            self.sokoban.deepen = false;
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = Some(timeout);
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save = true;
        }
    }

    /// Solver timeout as a duration
    pub fn timeout(&self) -> Option<Duration> {
        self.solver.timeout_seconds.map(Duration::from_secs)
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub horizon: Option<usize>,
    pub max_horizon: Option<usize>,
    pub no_deepen: bool,
    pub timeout_seconds: Option<u64>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}
