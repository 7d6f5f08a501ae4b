use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::{DurationSeconds, DurationSecondsWithFrac};

use crate::model::DEFAULT_MAX_LEVEL;

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    /// Animation pacing, passed through to the rendering collaborator.
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    #[serde(default = "default_tile_tween_duration")]
    pub tile_tween_duration: Duration,

    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_max_game_duration")]
    pub max_game_duration: Duration,

    #[serde(default = "default_true")]
    pub ensure_no_starting_matches: bool,

    #[serde(default = "default_max_level")]
    pub max_level: u32,

    #[serde(default = "default_board_width")]
    pub board_width: usize,

    #[serde(default = "default_board_height")]
    pub board_height: usize,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_tile_tween_duration() -> Duration {
    Duration::from_millis(250)
}
fn default_max_game_duration() -> Duration {
    Duration::from_secs(120)
}
fn default_max_level() -> u32 {
    DEFAULT_MAX_LEVEL
}
fn default_board_width() -> usize {
    8
}
fn default_board_height() -> usize {
    8
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            tile_tween_duration: default_tile_tween_duration(),
            max_game_duration: default_max_game_duration(),
            ensure_no_starting_matches: true,
            max_level: default_max_level(),
            board_width: default_board_width(),
            board_height: default_board_height(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&contents) {
                settings.migrate();
                return settings;
            }
        }
        let default = Settings::default();
        let _ = default.save_to(path);
        default
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        fs::write(path, contents)
    }

    fn settings_path() -> PathBuf {
        data_dir().join("settings.json")
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED")
            .map(|v| v.parse::<u64>().unwrap())
            .ok()
    }
}

/// Data directory for settings, level unlocks, and stats. Overridable via
/// `MATCHGRID_DATA_DIR`.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("MATCHGRID_DATA_DIR") {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".local/share/matchgrid"),
        None => std::env::temp_dir().join("matchgrid"),
    }
}
