//=========================================================================
// World State
//=========================================================================
//
// Everything the physics step reads and writes, in one explicit struct.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::config::GameConfig;
use super::level::{generate_platforms, LevelError, PlatformSpawn};
use crate::core::geometry::Rect;

/// Horizontal spawn position of the player.
const PLAYER_SPAWN_X: f32 = 50.0;

//=== Player ==============================================================

/// The player's box and motion. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
}

impl Player {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            vx: 0.0,
            vy: 0.0,
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

//=== Platform ============================================================

/// A static solid rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

//=== World ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub ground: Rect,
    /// Play area, origin at (0, 0).
    pub bounds: Rect,
}

impl World {
    /// Builds a level: ground along the bottom, player standing on it,
    /// platforms from `rng`.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, LevelError> {
        let ground = ground_rect(config);
        let platforms = generate_platforms(rng, &PlatformSpawn::from_config(config), &ground)?;

        let mut player = Player::new(
            PLAYER_SPAWN_X,
            ground.top() - config.player.height,
            config.player.width,
            config.player.height,
        );
        player.grounded = true;

        info!(
            "Level ready: {} platforms, player at ({}, {})",
            platforms.len(),
            player.x,
            player.y
        );

        Ok(Self {
            player,
            platforms,
            ground,
            bounds: Rect::new(0.0, 0.0, config.window.width as f32, config.window.height as f32),
        })
    }

    /// Ground first, then platforms.
    pub fn solids(&self) -> impl Iterator<Item = &Rect> {
        std::iter::once(&self.ground).chain(self.platforms.iter().map(|p| &p.rect))
    }
}

/// Full-width ground strip, one platform thick.
pub(crate) fn ground_rect(config: &GameConfig) -> Rect {
    let width = config.window.width as f32;
    let height = config.platforms.height;
    Rect::new(0.0, config.window.height as f32 - height, width, height)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_world_layout() {
        let config = GameConfig::default();
        let world = World::new(&config, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(world.ground, Rect::new(0.0, 580.0, 800.0, 20.0));
        assert_eq!(world.bounds, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(world.platforms.len(), 5);

        assert_eq!(world.player.bottom(), world.ground.top());
        assert_eq!(world.player.x, PLAYER_SPAWN_X);
        assert!(world.player.grounded);
    }

    #[test]
    fn player_spawns_clear_of_every_solid() {
        let config = GameConfig::default();
        for seed in 0..20 {
            let world = World::new(&config, &mut StdRng::seed_from_u64(seed)).unwrap();
            let player = world.player.rect();
            assert!(world.solids().all(|s| !player.intersects(s)), "seed {}", seed);
        }
    }

    #[test]
    fn solids_lists_ground_first() {
        let config = GameConfig::default();
        let world = World::new(&config, &mut StdRng::seed_from_u64(2)).unwrap();

        let solids: Vec<&Rect> = world.solids().collect();
        assert_eq!(solids.len(), 6);
        assert_eq!(*solids[0], world.ground);
    }

    #[test]
    fn bad_layout_fails_setup() {
        let mut config = GameConfig::default();
        config.platforms.width = 900.0;
        assert!(World::new(&config, &mut StdRng::seed_from_u64(0)).is_err());
    }
}
