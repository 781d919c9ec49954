//=========================================================================
// Game Configuration
//=========================================================================
//
// `config.json` loading and validation.
//
// Layout:
//   background.color
//   player.{color, width, height, jump_strength, move_speed}
//   platforms.{color, width, height, count}
//   obstacles.color            (ground)
//   physics.gravity
//   window.{width, height, title, tps}
//   seed                       (null = random per run)
//
// Units are pixels and seconds: speeds in px/s, gravity in px/s².
// Every field has a default, so a partial file only overrides what it
// names. A missing file means "all defaults".
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fs;
use std::io;
use std::path::Path;

//=== External Dependencies ===============================================

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::level::{LevelError, PlatformSpawn};
use super::world;
use crate::core::render::Color;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("invalid platform layout: {0}")]
    Level(#[from] LevelError),
}

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub color: Color,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self { color: [135, 206, 235] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub color: Color,
    pub width: f32,
    pub height: f32,
    /// Upward speed set by a jump, px/s.
    pub jump_strength: f32,
    /// Horizontal speed while a move key is held, px/s.
    pub move_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            width: 40.0,
            height: 50.0,
            jump_strength: 900.0,
            move_speed: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformsConfig {
    pub color: Color,
    pub width: f32,
    /// Also the ground's thickness.
    pub height: f32,
    pub count: usize,
}

impl Default for PlatformsConfig {
    fn default() -> Self {
        Self {
            color: [0, 128, 0],
            width: 120.0,
            height: 20.0,
            count: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstaclesConfig {
    pub color: Color,
}

impl Default for ObstaclesConfig {
    fn default() -> Self {
        Self { color: [128, 128, 128] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, px/s².
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gravity: 2160.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Simulation ticks per second.
    pub tps: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "2D Runner Platform Game".to_string(),
            tps: 60.0,
        }
    }
}

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub background: BackgroundConfig,
    pub player: PlayerConfig,
    pub platforms: PlatformsConfig,
    pub obstacles: ObstaclesConfig,
    pub physics: PhysicsConfig,
    pub window: WindowConfig,
    pub seed: Option<u64>,
}

impl GameConfig {
    //--- Loading ----------------------------------------------------------

    /// Loads and validates the config at `path`.
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged. Any other read failure, malformed JSON or invalid values
    /// are reported.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let config = match fs::read_to_string(path) {
            Ok(text) => {
                debug!("Loaded config from {}", path.display());
                Self::from_json(&text)?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses without validating.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    //--- Validation -------------------------------------------------------

    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(invalid(format!(
                "window size must be positive, got {}x{}",
                window.width, window.height
            )));
        }
        if !(window.tps.is_finite() && window.tps > 0.0) {
            return Err(invalid(format!("tps must be positive, got {}", window.tps)));
        }

        let player = &self.player;
        if !(positive(player.width) && positive(player.height)) {
            return Err(invalid(format!(
                "player size must be positive, got {}x{}",
                player.width, player.height
            )));
        }
        if !(non_negative(player.move_speed) && non_negative(player.jump_strength)) {
            return Err(invalid(format!(
                "player speeds must be finite and non-negative, got move {} jump {}",
                player.move_speed, player.jump_strength
            )));
        }
        if !non_negative(self.physics.gravity) {
            return Err(invalid(format!(
                "gravity must be finite and non-negative, got {}",
                self.physics.gravity
            )));
        }

        if !positive(self.platforms.height) {
            return Err(invalid(format!(
                "platform height must be positive, got {}",
                self.platforms.height
            )));
        }
        let ground = world::ground_rect(self);
        if player.width > ground.w || player.height > ground.top() {
            return Err(invalid(format!(
                "player {}x{} does not fit above the ground",
                player.width, player.height
            )));
        }

        PlatformSpawn::from_config(self).validate(&ground)?;
        Ok(())
    }
}

//=== Helpers =============================================================

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

//=========================================================================
// Unit Tests
//=========================================================================
