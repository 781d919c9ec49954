//=========================================================================
// Scene System
//=========================================================================
//
// Stack-based scene lifecycle.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S, A>>>
//     └─ stack: Vec<S>
//
// Flow per tick:
//   update() → active scenes (top-down until first opaque) → Scene::update()
//   render() → every scene on the stack, bottom-up → Scene::render()
//   process_transitions() → Push / Remove / Replace / Clear
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::input::Action;
use crate::core::render::FrameSnapshot;

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::{SceneKey, SceneManager, SceneTransition};
pub use transition_queue::TransitionQueue;

//=== Scene Trait =========================================================

/// Scene behavior with lifecycle hooks.
///
/// Scenes are registered once and keep their state between activations.
/// Only `update()` is required:
///
/// ```rust
/// # use runner_platformer::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Key { Main }
/// # impl SceneKey for Key {}
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Act { Jump }
/// # impl Action for Act {}
/// struct Idle;
///
/// impl Scene<Key, Act> for Idle {
///     fn update(&mut self, _context: &mut GlobalContext<Key, Act>) {}
/// }
/// ```
pub trait Scene<S: SceneKey, A: Action>: Send {
    /// Called when the scene enters the stack.
    fn on_enter(&mut self, _context: &mut GlobalContext<S, A>) {}

    /// Called when the scene leaves the stack.
    fn on_exit(&mut self, _context: &mut GlobalContext<S, A>) {}

    /// Called every tick while the scene is active.
    fn update(&mut self, context: &mut GlobalContext<S, A>);

    /// Appends this scene's sprites. Called for every scene on the stack,
    /// active or not, so a paused world stays visible.
    fn render(&self, _frame: &mut FrameSnapshot) {}

    /// Transparent scenes let the scene below keep updating.
    fn is_transparent(&self) -> bool {
        false
    }
}
