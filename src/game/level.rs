//=========================================================================
// Level Generation
//=========================================================================
//
// Random platform placement from a caller-supplied RNG.
//
// Parameters are validated before anything is drawn, so a bad layout
// fails at level setup and never reaches the frame loop. With the same
// seed the same layout comes out.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::Rng;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::config::GameConfig;
use super::world::Platform;
use crate::core::geometry::Rect;

//=== LevelError ==========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("platform spawn parameters must be finite")]
    NonFinite,

    #[error("inverted {axis} range: {min} > {max}")]
    InvertedRange { axis: char, min: f32, max: f32 },

    #[error("platform size must be positive, got {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    #[error("platforms reach y = {bottom} below the ground top at {ground_top}")]
    OverlapsGround { bottom: f32, ground_top: f32 },

    #[error("platforms span [{left}, {right}] outside the level [{min}, {max}]")]
    OutOfBounds { left: f32, right: f32, min: f32, max: f32 },
}

//=== PlatformSpawn =======================================================

/// Where and how many platforms to place. Ranges bound the top-left
/// corner and are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpawn {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl PlatformSpawn {
    /// Spawn band for a config: anywhere horizontally, between mid-screen
    /// and one player height above the ground.
    ///
    /// The gap keeps the space under every platform walkable.
    pub fn from_config(config: &GameConfig) -> Self {
        let width = config.platforms.width;
        let height = config.platforms.height;
        let screen_w = config.window.width as f32;
        let screen_h = config.window.height as f32;
        let ground_top = screen_h - height;

        Self {
            count: config.platforms.count,
            width,
            height,
            x_min: 0.0,
            x_max: screen_w - width,
            y_min: screen_h / 2.0,
            y_max: ground_top - height - config.player.height,
        }
    }

    /// Checks the parameters against the ground. The ground spans the
    /// level, so its horizontal extent is also the level bounds.
    pub fn validate(&self, ground: &Rect) -> Result<(), LevelError> {
        let values = [self.width, self.height, self.x_min, self.x_max, self.y_min, self.y_max];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(LevelError::NonFinite);
        }

        if self.x_min > self.x_max {
            return Err(LevelError::InvertedRange { axis: 'x', min: self.x_min, max: self.x_max });
        }
        if self.y_min > self.y_max {
            return Err(LevelError::InvertedRange { axis: 'y', min: self.y_min, max: self.y_max });
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LevelError::InvalidSize { width: self.width, height: self.height });
        }

        let lowest_bottom = self.y_max + self.height;
        if lowest_bottom > ground.top() {
            return Err(LevelError::OverlapsGround {
                bottom: lowest_bottom,
                ground_top: ground.top(),
            });
        }

        let rightmost = self.x_max + self.width;
        if self.x_min < ground.left() || rightmost > ground.right() {
            return Err(LevelError::OutOfBounds {
                left: self.x_min,
                right: rightmost,
                min: ground.left(),
                max: ground.right(),
            });
        }

        Ok(())
    }
}

//=== Generation ==========================================================

/// Places exactly `spawn.count` platforms.
///
/// # Errors
///
/// See [`PlatformSpawn::validate`]. Nothing is drawn from `rng` on error.
pub fn generate_platforms<R: Rng + ?Sized>(
    rng: &mut R,
    spawn: &PlatformSpawn,
    ground: &Rect,
) -> Result<Vec<Platform>, LevelError> {
    spawn.validate(ground)?;

    let platforms: Vec<Platform> = (0..spawn.count)
        .map(|_| {
            let x = rng.gen_range(spawn.x_min..=spawn.x_max);
            let y = rng.gen_range(spawn.y_min..=spawn.y_max);
            Platform::new(Rect::new(x, y, spawn.width, spawn.height))
        })
        .collect();

    debug!("Generated {} platforms", platforms.len());
    Ok(platforms)
}

//=========================================================================
// Unit Tests
//=========================================================================
