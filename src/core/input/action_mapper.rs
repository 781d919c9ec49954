//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps keys to game actions based on configured bindings and context.
//
// Architecture:
//   (key, context) → HashMap → Action
//
// Several keys may trigger the same action (← and A both move left).
// Only bindings in the active context resolve.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, InputContext},
    event::KeyCode,
    state_tracker::StateTracker,
};

//=== ActionMapper ========================================================

pub(crate) struct ActionMapper<A: Action> {
    bindings: HashMap<(KeyCode, InputContext), A>,
    current_context: InputContext,
}

impl<A: Action> ActionMapper<A> {
    pub(crate) fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            current_context: InputContext::Primary,
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action. Rebinding a key in the same context
    /// replaces the previous action.
    pub(crate) fn bind_key(&mut self, key: KeyCode, action: A, context: InputContext) {
        self.bindings.insert((key, context), action);
    }

    pub(crate) fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.bindings.remove(&(key, context));
    }

    pub(crate) fn clear_context(&mut self, context: InputContext) {
        self.bindings.retain(|&(_, ctx), _| ctx != context);
    }

    //--- Context ----------------------------------------------------------

    pub(crate) fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    pub(crate) fn current_context(&self) -> InputContext {
        self.current_context
    }

    //--- Mapping ----------------------------------------------------------

    /// Maps a key in the active context.
    pub(crate) fn map_key(&self, key: KeyCode) -> Option<A> {
        self.bindings.get(&(key, self.current_context)).copied()
    }

    /// Actions whose keys are currently held.
    pub(crate) fn held_actions<'a>(
        &'a self,
        tracker: &'a StateTracker,
    ) -> impl Iterator<Item = A> + 'a {
        tracker.keys_down().filter_map(|&key| self.map_key(key))
    }

    /// Actions whose keys went down this tick.
    pub(crate) fn pressed_actions<'a>(
        &'a self,
        tracker: &'a StateTracker,
    ) -> impl Iterator<Item = A> + 'a {
        tracker.keys_pressed().filter_map(|&key| self.map_key(key))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::InputEvent;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Left,
        Jump,
        Resume,
    }

    impl Action for TestAction {}

    const PAUSED: InputContext = InputContext::custom(0);

    fn tracker_with(events: &[InputEvent]) -> StateTracker {
        let mut tracker = StateTracker::new();
        tracker.begin_tick();
        tracker.process_events(events);
        tracker
    }

    #[test]
    fn bound_key_maps_in_primary_context() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::Space, TestAction::Jump, InputContext::Primary);

        assert_eq!(mapper.map_key(KeyCode::Space), Some(TestAction::Jump));
        assert_eq!(mapper.map_key(KeyCode::KeyA), None);
    }

    #[test]
    fn bindings_are_scoped_to_context() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::Escape, TestAction::Resume, PAUSED);

        assert_eq!(mapper.map_key(KeyCode::Escape), None);

        mapper.set_context(PAUSED);
        assert_eq!(mapper.current_context(), PAUSED);
        assert_eq!(mapper.map_key(KeyCode::Escape), Some(TestAction::Resume));
    }

    #[test]
    fn rebinding_replaces_previous_action() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::KeyW, TestAction::Left, InputContext::Primary);
        mapper.bind_key(KeyCode::KeyW, TestAction::Jump, InputContext::Primary);
        assert_eq!(mapper.map_key(KeyCode::KeyW), Some(TestAction::Jump));
    }

    #[test]
    fn unbind_and_clear_context_remove_bindings() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::KeyA, TestAction::Left, InputContext::Primary);
        mapper.bind_key(KeyCode::Space, TestAction::Jump, InputContext::Primary);
        mapper.bind_key(KeyCode::Escape, TestAction::Resume, PAUSED);

        mapper.unbind_key(KeyCode::KeyA, InputContext::Primary);
        assert_eq!(mapper.map_key(KeyCode::KeyA), None);

        mapper.clear_context(InputContext::Primary);
        assert_eq!(mapper.map_key(KeyCode::Space), None);

        mapper.set_context(PAUSED);
        assert_eq!(mapper.map_key(KeyCode::Escape), Some(TestAction::Resume));
    }

    #[test]
    fn held_and_pressed_actions_follow_tracker() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::ArrowLeft, TestAction::Left, InputContext::Primary);
        mapper.bind_key(KeyCode::KeyA, TestAction::Left, InputContext::Primary);
        mapper.bind_key(KeyCode::Space, TestAction::Jump, InputContext::Primary);

        let mut tracker = tracker_with(&[
            InputEvent::KeyDown { key: KeyCode::KeyA },
            InputEvent::KeyDown { key: KeyCode::Space },
        ]);

        let held: Vec<_> = mapper.held_actions(&tracker).collect();
        assert!(held.contains(&TestAction::Left));
        assert!(held.contains(&TestAction::Jump));

        let pressed: Vec<_> = mapper.pressed_actions(&tracker).collect();
        assert!(pressed.contains(&TestAction::Jump));

        // Next tick: still held, no longer pressed
        tracker.begin_tick();
        assert_eq!(mapper.pressed_actions(&tracker).count(), 0);
        assert_eq!(mapper.held_actions(&tracker).count(), 2);
    }
}
