//=========================================================================
// Gameplay Scene
//=========================================================================
//
// Owns the World and runs one physics step per tick.
//
// Per tick:
//   Pause pressed   → push Paused, switch to the pause bindings
//   Restart pressed → rebuild the level from the next seed
//   otherwise       → actions → ControlState → physics::step
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::render::{FrameSnapshot, SpriteKind};
use crate::core::scene::{Scene, SceneTransition};
use crate::core::GlobalContext;
use crate::game::config::GameConfig;
use crate::game::level::LevelError;
use crate::game::physics::{self, ControlState, PhysicsParams};
use crate::game::world::World;
use crate::game::{GameAction, GameScene, PAUSE_CONTEXT};

//=== GameplayScene =======================================================

pub struct GameplayScene {
    config: GameConfig,
    params: PhysicsParams,
    seed: u64,
    world: World,
}

impl GameplayScene {
    /// Builds the first level from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, LevelError> {
        let world = build_world(&config, seed)?;
        Ok(Self {
            params: PhysicsParams::from_config(&config),
            config,
            seed,
            world,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Regenerates the level from the next seed. The current level is
    /// kept if generation fails.
    fn restart(&mut self) {
        let seed = self.seed.wrapping_add(1);
        match build_world(&self.config, seed) {
            Ok(world) => {
                info!("Level restarted (seed {})", seed);
                self.seed = seed;
                self.world = world;
            }
            Err(e) => error!("Restart failed, keeping current level: {}", e),
        }
    }
}

fn build_world(config: &GameConfig, seed: u64) -> Result<World, LevelError> {
    World::new(config, &mut StdRng::seed_from_u64(seed))
}

//=== Scene Implementation ================================================

impl Scene<GameScene, GameAction> for GameplayScene {
    fn on_enter(&mut self, _context: &mut GlobalContext<GameScene, GameAction>) {
        debug!("Gameplay entered (seed {})", self.seed);
    }

    fn update(&mut self, context: &mut GlobalContext<GameScene, GameAction>) {
        let actions = &context.actions;

        if actions.is_pressed(GameAction::Pause) {
            debug!("Pausing at tick {}", context.tick());
            context.transition(SceneTransition::Push(GameScene::Paused));
            context.request_input_context(PAUSE_CONTEXT);
            return;
        }

        if actions.is_pressed(GameAction::Restart) {
            self.restart();
            return;
        }

        let controls = ControlState {
            left: actions.is_held(GameAction::MoveLeft),
            right: actions.is_held(GameAction::MoveRight),
            jump: actions.is_pressed(GameAction::Jump),
        };

        physics::step(&mut self.world, controls, &self.params, context.dt());

        let player = &self.world.player;
        trace!(
            "tick {}: pos ({:.1}, {:.1}) vel ({:.1}, {:.1}) grounded {}",
            context.tick(),
            player.x,
            player.y,
            player.vx,
            player.vy,
            player.grounded
        );
    }

    fn render(&self, frame: &mut FrameSnapshot) {
        frame.background = self.config.background.color;
        frame.push(self.world.ground, self.config.obstacles.color, SpriteKind::Ground);
        for platform in &self.world.platforms {
            frame.push(platform.rect, self.config.platforms.color, SpriteKind::Platform);
        }
        frame.push(self.world.player.rect(), self.config.player.color, SpriteKind::Player);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
