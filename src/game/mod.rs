pub mod board_engine;
pub mod collaborators;
pub mod level_progression;
pub mod match_finder;
pub mod persistence;
pub mod settings;
pub mod stats_manager;

pub use board_engine::{BoardEngine, SetupError};
pub use match_finder::{MatchFinder, RunScanner, MIN_RUN_LENGTH};
