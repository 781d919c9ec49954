//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Systems operate on the GlobalContext each tick; games configure them
// once through `Engine::init`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{Action, InputSystem};
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Engine-level logic systems.
///
/// - `input`: key bindings and action resolution
/// - `scene_manager`: stack-based scene lifecycle
/// - `initial_scene`: pushed when the logic thread starts
pub struct GlobalSystems<S: SceneKey, A: Action> {
    pub input: InputSystem<A>,
    pub scene_manager: SceneManager<S, A>,
    pub initial_scene: Option<S>,
}

impl<S: SceneKey, A: Action> GlobalSystems<S, A> {
    pub(crate) fn new() -> Self {
        Self {
            input: InputSystem::new(),
            scene_manager: SceneManager::new(),
            initial_scene: None,
        }
    }

    /// Enters the initial scene, if one was set.
    pub(crate) fn start(&mut self, context: &mut GlobalContext<S, A>) {
        if let Some(initial) = self.initial_scene {
            self.scene_manager.start(initial, context);
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input**: tick events → key state → actions
    /// 2. **Scenes**: update active scenes
    /// 3. **Snapshot**: render the whole stack into `context.frame`
    /// 4. **Transitions**: apply queued stack changes
    /// 5. **Context switch**: apply a requested input context
    pub(crate) fn update(&mut self, context: &mut GlobalContext<S, A>) {
        // 1. Input
        let focus_lost = std::mem::take(&mut context.focus_lost);
        self.input.process_tick(
            &mut context.input_state,
            &context.frame_events,
            focus_lost,
            &mut context.actions,
        );
        context.frame_events.clear();

        // 2. Scenes
        self.scene_manager.update(context);

        // 3. Snapshot
        context.frame.begin(context.tick());
        self.scene_manager.render(&mut context.frame);

        // 4. Transitions
        self.scene_manager.process_transitions(context);

        // 5. Input context
        if let Some(input_context) = context.take_input_context_request() {
            self.input.set_context(input_context);
        }

        context.advance_tick();
    }
}
