//=========================================================================
// State Tracker
//=========================================================================
//
// Keyboard state with per-tick deltas.
//
// Architecture:
//   InputEvent → process_events() → keys_down (held)
//                                  → pressed / released (this tick)
//
// Tick lifecycle: begin_tick() → process_events() → query
//
// A key pressed and released inside one tick reports both transitions,
// so a quick tap on Jump is never lost between two logic ticks.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// Tracks held keys and the keys that changed during the current tick.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives tick boundary) -----------------------
    keys_down: HashSet<KeyCode>,

    //--- Tick Deltas (reset by begin_tick) -------------------------------
    pressed_this_tick: HashSet<KeyCode>,
    released_this_tick: HashSet<KeyCode>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Tick Processing --------------------------------------------------

    /// Clears the per-tick deltas. Held keys are kept.
    pub(crate) fn begin_tick(&mut self) {
        self.pressed_this_tick.clear();
        self.released_this_tick.clear();
    }

    /// Applies a batch of events in arrival order.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Releases every held key (e.g. the window lost focus).
    pub(crate) fn release_all(&mut self) {
        self.released_this_tick.extend(self.keys_down.drain());
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => {
                // Repeated KeyDown for a held key is not a new press
                if self.keys_down.insert(key) {
                    self.pressed_this_tick.insert(key);
                }
            }
            InputEvent::KeyUp { key } => {
                if self.keys_down.remove(&key) {
                    self.released_this_tick.insert(key);
                }
            }
            InputEvent::Unidentified => {}
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns `true` only on the tick the key went UP → DOWN.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_this_tick.contains(&key)
    }

    /// Returns `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` only on the tick the key went DOWN → UP.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.released_this_tick.contains(&key)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.pressed_this_tick.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
