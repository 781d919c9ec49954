//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Scenes read input and time from here and write back requests
// (transitions, context switch, exit). Nothing here is shared across
// threads: the context lives on the logic thread only.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{Action, ActionState, InputContext, InputEvent, StateTracker};
use crate::core::render::FrameSnapshot;
use crate::core::scene::{SceneKey, SceneTransition, TransitionQueue};

//=== GlobalContext =======================================================

/// Per-tick data handed to scenes.
pub struct GlobalContext<S: SceneKey, A: Action> {
    /// Raw keyboard state.
    pub input_state: StateTracker,

    /// Actions resolved for this tick.
    pub actions: ActionState<A>,

    /// Transitions applied at the end of the tick.
    pub scene_transitions: TransitionQueue<S>,

    /// Snapshot handed to the presenter after the tick.
    pub frame: FrameSnapshot,

    /// Fixed simulation step in seconds.
    dt: f32,

    /// Ticks completed since start.
    tick: u64,

    exit_requested: bool,
    requested_input_context: Option<InputContext>,

    //--- Engine-internal, filled by the event collector -------------------
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
    pub(crate) focus_lost: bool,
}

impl<S: SceneKey, A: Action> GlobalContext<S, A> {
    pub(crate) fn new(dt: f32) -> Self {
        Self {
            input_state: StateTracker::new(),
            actions: ActionState::new(),
            scene_transitions: TransitionQueue::new(),
            frame: FrameSnapshot::default(),
            dt,
            tick: 0,
            exit_requested: false,
            requested_input_context: None,
            frame_events: Vec::new(),
            focus_lost: false,
        }
    }

    //--- Time -------------------------------------------------------------

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    //--- Requests ---------------------------------------------------------

    /// Queues a scene transition.
    pub fn transition(&mut self, transition: SceneTransition<S>) {
        self.scene_transitions.push(transition);
    }

    /// Asks the engine to stop after this tick.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Switches the active input bindings at the end of this tick.
    pub fn request_input_context(&mut self, context: InputContext) {
        self.requested_input_context = Some(context);
    }

    pub(crate) fn take_input_context_request(&mut self) -> Option<InputContext> {
        self.requested_input_context.take()
    }
}
