//! 9x9 Sudoku as a SAT problem

pub mod decoder;
pub mod encoder;
pub mod grid;
pub mod io;
pub mod validator;
pub mod variables;

pub use decoder::decode_model;
pub use encoder::{EncodingOptions, SudokuEncoder};
pub use grid::SudokuGrid;
pub use io::{create_example_sudokus, load_sudoku_from_file, parse_sudoku, save_sudoku_to_file};
pub use validator::SudokuValidator;
pub use variables::SudokuVariables;
