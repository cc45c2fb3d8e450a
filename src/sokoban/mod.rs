//! Bounded-horizon Sokoban as a SAT problem

pub mod decoder;
pub mod encoder;
pub mod io;
pub mod level;
pub mod simulator;
pub mod variables;

pub use decoder::{decode_model, Plan};
pub use encoder::SokobanEncoder;
pub use io::{create_example_levels, load_level_from_file, parse_level, save_level_to_file};
pub use level::{moves_to_string, parse_moves, Direction, Level, Position, Snapshot};
pub use simulator::{validate_plan, PlanValidation};
pub use variables::SokobanVariables;
