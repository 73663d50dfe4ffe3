//! Colored-Region Queens Solver Library
//!
//! Solves queen-placement puzzles on an N×N board partitioned into color
//! regions: one queen per row, column and region, with no two queens
//! adjacent. Provides the packed cell codec, immutable board snapshots with
//! one-step lookahead pruning, candidate-ordering heuristics, and a
//! backtracking search engine in tree and memoized graph variants.

pub mod board;
pub mod cell;
pub mod error;
pub mod heuristic;
pub mod level;
pub mod record;
pub mod search;

pub use board::{format_board, format_regions, BoardState, Legality, MAX_BOARD_SIZE};
pub use cell::{Cell, CellState};
pub use error::Error;
pub use heuristic::Heuristic;
pub use level::{load_levels, Level};
pub use record::{record_path, write_records_csv, RunRecord};
pub use search::{SearchOutcome, Solver, Strategy};
