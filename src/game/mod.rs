//=========================================================================
// Runner Game
//=========================================================================
//
// The platformer built on top of the engine.
//
// Modules:
// - `config`:  config.json loading and validation
// - `world`:   Player, Platform, World
// - `level`:   seeded platform generation
// - `physics`: the per-tick physics step
// - `scenes`:  Gameplay and Paused
//
// Controls:
//   ← / A       move left          Escape   pause / resume
//   → / D       move right         R        restart (next seed)
//   Space/↑/W   jump               Q        quit (while paused)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod level;
pub mod physics;
pub mod world;

pub mod scenes {
    pub mod gameplay;
    pub mod paused;

    pub use gameplay::GameplayScene;
    pub use paused::PausedScene;
}

//=== Internal Dependencies ===============================================

use log::info;

use crate::core::geometry::Rect;
use crate::core::input::{Action, InputContext, InputSystem, KeyCode};
use crate::core::scene::SceneKey;
use crate::core::GlobalSystems;
use config::GameConfig;
use level::LevelError;
use scenes::{GameplayScene, PausedScene};

//=== Actions & Scenes ====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Jump,
    Pause,
    Resume,
    Restart,
    Quit,
}

impl Action for GameAction {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScene {
    Gameplay,
    Paused,
}

impl SceneKey for GameScene {}

/// Bindings active while the pause overlay is up.
pub const PAUSE_CONTEXT: InputContext = InputContext::custom(0);

//=== Setup ===============================================================

/// Installs the default key bindings.
pub fn bind_default_keys(input: &mut InputSystem<GameAction>) {
    use GameAction::*;

    let play = InputContext::Primary;
    for (key, action) in [
        (KeyCode::ArrowLeft, MoveLeft),
        (KeyCode::KeyA, MoveLeft),
        (KeyCode::ArrowRight, MoveRight),
        (KeyCode::KeyD, MoveRight),
        (KeyCode::Space, Jump),
        (KeyCode::ArrowUp, Jump),
        (KeyCode::KeyW, Jump),
        (KeyCode::Escape, Pause),
        (KeyCode::KeyR, Restart),
    ] {
        input.bind_key(key, action, play);
    }

    input.bind_key(KeyCode::Escape, Resume, PAUSE_CONTEXT);
    input.bind_key(KeyCode::KeyQ, Quit, PAUSE_CONTEXT);
}

/// Registers both scenes and starts in gameplay.
///
/// # Errors
///
/// Fails if the first level cannot be generated from `config`.
pub fn register(
    systems: &mut GlobalSystems<GameScene, GameAction>,
    config: &GameConfig,
    seed: u64,
) -> Result<(), LevelError> {
    let gameplay = GameplayScene::new(config.clone(), seed)?;
    let area = Rect::new(0.0, 0.0, config.window.width as f32, config.window.height as f32);

    bind_default_keys(&mut systems.input);
    systems.scene_manager.register_scene(GameScene::Gameplay, Box::new(gameplay));
    systems.scene_manager.register_scene(GameScene::Paused, Box::new(PausedScene::new(area)));
    systems.initial_scene = Some(GameScene::Gameplay);

    info!("Game registered (seed {})", seed);
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
