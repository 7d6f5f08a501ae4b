mod board_command;
mod board_event;
mod grid;
mod level_state;
mod match_run;
mod outcome;
mod phase;
mod score_state;
mod selection;
mod session_stats;
mod tile;
mod tile_type;
mod timer_state;

pub use board_command::BoardCommand;
pub use board_event::BoardEvent;
pub use grid::{GridState, TileMatrix};
pub use level_state::{LevelState, DEFAULT_MAX_LEVEL};
pub use match_run::MatchRun;
pub use outcome::SessionOutcome;
pub use phase::BoardPhase;
pub use score_state::{ScoreState, MATCH_PROGRESS_AWARD, MATCH_SCORE_AWARD, PROGRESS_GOAL};
pub use selection::SelectionBuffer;
pub use session_stats::SessionRecord;
pub use tile::Tile;
pub use tile_type::{TileType, TileTypeCatalog, TileTypeId};
pub use timer_state::TimerState;
