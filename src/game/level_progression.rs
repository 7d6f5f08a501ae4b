use log::{trace, warn};

use super::persistence::{flush_logged, KeyValueStore};
use crate::model::LevelState;

/// Store key for the persisted unlocked-level count.
pub const UNLOCKED_LEVELS_KEY: &str = "unlocked_levels";

/// Level-unlock counter gating which levels are playable. `unlocked_levels`
/// only ever grows; it is loaded once at startup and written through the
/// injected store whenever it changes.
pub struct LevelProgression {
    state: LevelState,
    max_level: u32,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for LevelProgression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LevelProgression {{ state: {:?}, max_level: {} }}",
            self.state, self.max_level
        )
    }
}

impl LevelProgression {
    pub fn load(store: Box<dyn KeyValueStore>, max_level: u32) -> Self {
        let unlocked = store.get_int(UNLOCKED_LEVELS_KEY, 1).clamp(1, max_level as i32) as u32;
        trace!(target: "levels", "Loaded unlocked_levels = {}", unlocked);
        Self {
            state: LevelState {
                current_level: 1,
                unlocked_levels: unlocked,
            },
            max_level,
            store,
        }
    }

    pub fn current_level(&self) -> u32 {
        self.state.current_level
    }

    pub fn unlocked_levels(&self) -> u32 {
        self.state.unlocked_levels
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        self.state.is_unlocked(level)
    }

    /// Picks the level the next session runs. Out-of-range values clamp
    /// into 1..=max.
    pub fn set_current(&mut self, level: u32) {
        let clamped = level.clamp(1, self.max_level);
        if clamped != level {
            warn!(target: "levels", "Level {} out of range, clamped to {}", level, clamped);
        }
        self.state.current_level = clamped;
    }

    /// Advances both counters when below the cap and persists. Returns
    /// whether anything moved.
    pub fn advance(&mut self) -> bool {
        if self.state.current_level >= self.max_level {
            return false;
        }
        self.state.current_level += 1;
        self.state.unlocked_levels += 1;
        self.save();
        true
    }

    fn save(&mut self) {
        self.store
            .set_int(UNLOCKED_LEVELS_KEY, self.state.unlocked_levels as i32);
        flush_logged(self.store.as_mut());
    }
}
