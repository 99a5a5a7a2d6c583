//! Runtime configuration, read once at startup from a JSON file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::screens::ScreenKey;

/// Overrides the settings file location.
pub const CONFIG_ENV: &str = "LASER_ARCADE_CONFIG";

/// Where a loaded `Settings` came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(PathBuf),
    /// No file at this path.
    Defaults(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File(path) => write!(f, "loaded settings from {}", path.display()),
            Origin::Defaults(path) => write!(f, "no settings at {}, using defaults", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play-field width in cells; 0 uses the terminal width.
    pub width: u16,
    /// Play-field height in cells; 0 uses the terminal height.
    pub height: u16,
    pub fps: u32,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    pub music_volume: f32,
    pub start_screen: ScreenKey,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            fps: 30,
            seed: None,
            music_volume: 0.1,
            start_screen: ScreenKey::MainMenu,
            log_file: std::env::temp_dir().join("laser_arcade.log"),
        }
    }
}

impl Settings {
    /// `$LASER_ARCADE_CONFIG`, else `~/.laser_arcade.json`.
    pub fn path() -> PathBuf {
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".laser_arcade.json")
    }

    pub fn load() -> Result<(Self, Origin), GameError> {
        Self::load_from(&Self::path())
    }

    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error. Loading happens before logging is configured, so the caller
    /// reports the returned `Origin`.
    pub fn load_from(path: &Path) -> Result<(Self, Origin), GameError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok((Self::from_json(&text)?, Origin::File(path.to_path_buf()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok((Self::default(), Origin::Defaults(path.to_path_buf())))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.max(1) as u64)
    }

    /// Resolve zero dimensions against the terminal size.
    pub fn resolve_size(&self, terminal: (u16, u16)) -> (u16, u16) {
        let width = if self.width == 0 { terminal.0 } else { self.width };
        let height = if self.height == 0 { terminal.1 } else { self.height };
        (width, height)
    }
}
