//! Game settings
//!
//! Physics tuning, input scaling, and an optional custom maze, stored as JSON.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{KEY_TILT, MAX_DT, MAX_TILT_DEGREES};
use crate::frame::FrameDriver;
use crate::input::InputState;
use crate::sim::{ConfigError, Maze, MazeError, PhysicsEngine, PhysicsParams, REFERENCE_LAYOUT};

/// Failure loading settings or building a session from them
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Maze(MazeError),
    Config(ConfigError),
    /// Frame/input scaling value out of range
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read settings: {e}"),
            Self::Parse(e) => write!(f, "invalid settings JSON: {e}"),
            Self::Maze(e) => write!(f, "invalid maze layout: {e}"),
            Self::Config(e) => write!(f, "invalid physics settings: {e}"),
            Self::OutOfRange { field, value } => {
                write!(f, "setting `{field}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Maze(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<MazeError> for SettingsError {
    fn from(e: MazeError) -> Self {
        Self::Maze(e)
    }
}

impl From<ConfigError> for SettingsError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsParams,
    /// Largest frame gap integrated in one step (seconds)
    pub max_dt: f32,
    /// Orientation angle treated as full tilt (degrees)
    pub max_tilt_degrees: f32,
    /// Input magnitude for a held arrow key
    pub key_tilt: f32,
    /// Custom layout rows; `None` uses the built-in maze
    pub layout: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsParams::default(),
            max_dt: MAX_DT,
            max_tilt_degrees: MAX_TILT_DEGREES,
            key_tilt: KEY_TILT,
            layout: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Check everything except the layout, which `build_maze` checks
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.physics.validate()?;
        let positive = [
            ("max_dt", self.max_dt),
            ("max_tilt_degrees", self.max_tilt_degrees),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::OutOfRange { field, value });
            }
        }
        if !(self.key_tilt.is_finite() && (0.0..=1.0).contains(&self.key_tilt)) {
            return Err(SettingsError::OutOfRange {
                field: "key_tilt",
                value: self.key_tilt,
            });
        }
        Ok(())
    }

    pub fn build_maze(&self) -> Result<Maze, MazeError> {
        match &self.layout {
            Some(rows) => Maze::from_layout(rows.as_slice()),
            None => Maze::from_layout(&REFERENCE_LAYOUT),
        }
    }

    pub fn build_engine(&self) -> Result<PhysicsEngine, SettingsError> {
        let maze = self.build_maze()?;
        Ok(PhysicsEngine::with_params(maze, self.physics)?)
    }

    pub fn build_input(&self) -> InputState {
        InputState::new(self.max_tilt_degrees, self.key_tilt)
    }

    /// Engine, input, and frame driver wired up from these settings
    pub fn build_driver(&self) -> Result<FrameDriver, SettingsError> {
        self.validate()?;
        Ok(FrameDriver::with_max_dt(
            self.build_engine()?,
            self.build_input(),
            self.max_dt,
        ))
    }
}
