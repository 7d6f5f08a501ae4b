use serde::{Deserialize, Serialize};

/// Default highest playable level.
pub const DEFAULT_MAX_LEVEL: u32 = 12;

/// Level counters. `unlocked_levels` is monotonically non-decreasing and
/// outlives sessions; `current_level` is whichever level the session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LevelState {
    pub current_level: u32,
    pub unlocked_levels: u32,
}

impl Default for LevelState {
    fn default() -> Self {
        Self {
            current_level: 1,
            unlocked_levels: 1,
        }
    }
}

impl LevelState {
    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.unlocked_levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_starts_at_level_one() {
        let state = LevelState::default();
        assert_eq!(state.current_level, 1);
        assert_eq!(state.unlocked_levels, 1);
    }

    #[test]
    fn test_is_unlocked_bounds() {
        let state = LevelState {
            current_level: 2,
            unlocked_levels: 3,
        };
        assert!(!state.is_unlocked(0));
        assert!(state.is_unlocked(1));
        assert!(state.is_unlocked(3));
        assert!(!state.is_unlocked(4));
    }
}
