use std::time::Duration;

use uuid::Uuid;

use super::TileType;

/// Notifications emitted by the board engine, fired synchronously and once
/// per occurrence. External listeners (scoring displays, achievements,
/// level selectors) subscribe through the event observer.
#[derive(Debug, Clone)]
pub enum BoardEvent {
    SessionStarted {
        level: u32,
        session_id: Uuid,
    },
    /// One resolved match: the matched type and how many tiles it covered.
    MatchResolved {
        tile_type: TileType,
        tile_count: usize,
    },
    ScoreChanged {
        score: u32,
        progress: u32,
    },
    TimerChanged {
        remaining: Duration,
    },
    /// The settle pass reshuffled the board (count of full-board shuffles).
    BoardSettled {
        reshuffles: u32,
    },
    GameWon {
        score: u32,
        remaining: Duration,
    },
    GameLost {
        score: u32,
        progress: u32,
    },
    /// Level counters moved; level-selection affordances should refresh.
    LevelsChanged {
        current_level: u32,
        unlocked_levels: u32,
    },
}
