//=========================================================================
// Input System
//
// High-level input handling for the logic thread.
//
// Responsibilities:
// - Feed the tick's raw keyboard batches into the `StateTracker`
// - Resolve bindings into the tick's `ActionState` (held + pressed)
// - Own the active `InputContext`
//
// Notes:
// Scenes never see key codes for gameplay decisions: they read actions
// from `GlobalContext::actions`. Raw key queries stay available through
// `GlobalContext::input_state` for debugging tools.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub(crate) mod action_mapper;
pub mod event;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, InputContext};
pub use event::{InputEvent, KeyCode};
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use action_mapper::ActionMapper;

//=== ActionState =========================================================

/// Actions resolved for the current tick.
#[derive(Debug, Clone)]
pub struct ActionState<A: Action> {
    held: HashSet<A>,
    pressed: HashSet<A>,
}

impl<A: Action> ActionState<A> {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
        }
    }

    /// `true` while any key bound to `action` is held.
    pub fn is_held(&self, action: A) -> bool {
        self.held.contains(&action)
    }

    /// `true` only on the tick a key bound to `action` went down.
    pub fn is_pressed(&self, action: A) -> bool {
        self.pressed.contains(&action)
    }

    pub(crate) fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }

    #[cfg(test)]
    pub(crate) fn with(held: &[A], pressed: &[A]) -> Self {
        Self {
            held: held.iter().copied().collect(),
            pressed: pressed.iter().copied().collect(),
        }
    }
}

impl<A: Action> Default for ActionState<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== InputSystem =========================================================

/// Owns key bindings and resolves them each tick.
pub struct InputSystem<A: Action> {
    mapper: ActionMapper<A>,
}

impl<A: Action> InputSystem<A> {
    pub fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
        }
    }

    //--- Bindings ---------------------------------------------------------

    /// Binds `key` to `action` in `context`.
    pub fn bind_key(&mut self, key: KeyCode, action: A, context: InputContext) {
        debug!("Binding {:?} -> {:?} in {:?}", key, action, context);
        self.mapper.bind_key(key, action, context);
    }

    pub fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.mapper.unbind_key(key, context);
    }

    pub fn clear_context(&mut self, context: InputContext) {
        self.mapper.clear_context(context);
    }

    pub fn set_context(&mut self, context: InputContext) {
        if self.mapper.current_context() != context {
            debug!("Input context -> {:?}", context);
        }
        self.mapper.set_context(context);
    }

    pub fn current_context(&self) -> InputContext {
        self.mapper.current_context()
    }

    //--- Tick Processing --------------------------------------------------

    /// Applies this tick's events and recomputes `actions`.
    ///
    /// `focus_lost` releases all keys first, so a key held while the
    /// window lost focus does not keep the player running.
    pub(crate) fn process_tick(
        &self,
        tracker: &mut StateTracker,
        batches: &[Vec<InputEvent>],
        focus_lost: bool,
        actions: &mut ActionState<A>,
    ) {
        tracker.begin_tick();
        if focus_lost {
            tracker.release_all();
        }
        for batch in batches {
            tracker.process_events(batch);
        }

        actions.clear();
        actions.held.extend(self.mapper.held_actions(tracker));
        actions.pressed.extend(self.mapper.pressed_actions(tracker));

        if !actions.pressed.is_empty() {
            trace!("Actions pressed: {:?}", actions.pressed);
        }
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Right,
        Jump,
    }

    impl Action for TestAction {}

    fn system() -> InputSystem<TestAction> {
        let mut input = InputSystem::new();
        input.bind_key(KeyCode::ArrowRight, TestAction::Right, InputContext::Primary);
        input.bind_key(KeyCode::Space, TestAction::Jump, InputContext::Primary);
        input
    }

    #[test]
    fn tick_resolves_held_and_pressed_actions() {
        let input = system();
        let mut tracker = StateTracker::new();
        let mut actions = ActionState::new();

        let batches = vec![vec![
            InputEvent::KeyDown { key: KeyCode::ArrowRight },
            InputEvent::KeyDown { key: KeyCode::Space },
        ]];
        input.process_tick(&mut tracker, &batches, false, &mut actions);

        assert!(actions.is_held(TestAction::Right));
        assert!(actions.is_pressed(TestAction::Jump));

        input.process_tick(&mut tracker, &[], false, &mut actions);
        assert!(actions.is_held(TestAction::Jump));
        assert!(!actions.is_pressed(TestAction::Jump), "Jump is edge-triggered");
    }

    #[test]
    fn focus_loss_releases_held_actions() {
        let input = system();
        let mut tracker = StateTracker::new();
        let mut actions = ActionState::new();

        let batches = vec![vec![InputEvent::KeyDown { key: KeyCode::ArrowRight }]];
        input.process_tick(&mut tracker, &batches, false, &mut actions);
        assert!(actions.is_held(TestAction::Right));

        input.process_tick(&mut tracker, &[], true, &mut actions);
        assert!(!actions.is_held(TestAction::Right));
    }

    #[test]
    fn inactive_context_resolves_nothing() {
        let mut input = system();
        input.set_context(InputContext::custom(3));
        assert_eq!(input.current_context(), InputContext::custom(3));

        let mut tracker = StateTracker::new();
        let mut actions = ActionState::new();
        let batches = vec![vec![InputEvent::KeyDown { key: KeyCode::Space }]];
        input.process_tick(&mut tracker, &batches, false, &mut actions);

        assert!(!actions.is_pressed(TestAction::Jump));
        assert!(tracker.is_key_pressed(KeyCode::Space), "Raw state is context-free");
    }
}
