use std::time::Duration;

/// Session control surface, deliverable over the command channel.
#[derive(Debug, Clone)]
pub enum BoardCommand {
    /// Player tapped the tile at (x, y).
    Select { x: usize, y: usize },
    StartGame,
    ResetBoard,
    SelectLevel(u32),
    AdvanceToNextLevel,
    StartTimer,
    StopTimer,
    /// Owner-driven time advance; elapsed wall time since the last tick.
    Tick(Duration),
}
