//=========================================================================
// Input Buffer
//
// Collects key events between two redraws and hands them over as one
// ordered batch.
//
// Responsibilities:
// - Keep arrival order (press/release order matters within a tick)
// - Drop consecutive duplicates (e.g. two KeyDown for the same key)
// - Send nothing for an idle frame
//
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 32;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Buffering --------------------------------------------------------
    //
    // Duplicate consecutive events are ignored to prevent flooding.
    //
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events, or None if there were none.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            return None;
        }
        let capacity = self.events.capacity();
        Some(std::mem::replace(&mut self.events, Vec::with_capacity(capacity)))
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::KeyCode;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key }
    }

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyA));
        buffer.push(key_down(KeyCode::KeyD));
        assert_eq!(buffer.len(), 2, "Duplicates should be ignored");
    }

    #[test]
    fn press_release_press_is_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::Space));
        buffer.push(key_up(KeyCode::Space));
        buffer.push(key_down(KeyCode::Space));

        let events = buffer.drain().expect("events buffered");
        assert_eq!(
            events,
            vec![key_down(KeyCode::Space), key_up(KeyCode::Space), key_down(KeyCode::Space)]
        );
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA));

        assert_eq!(buffer.drain().map(|e| e.len()), Some(1));
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none(), "Idle frame sends nothing");
    }

    #[test]
    fn drain_leaves_a_buffer_of_the_same_capacity() {
        let mut buffer = InputBuffer::new();
        for i in 0..64 {
            let key = if i % 2 == 0 { KeyCode::KeyA } else { KeyCode::KeyD };
            buffer.push(key_down(key));
        }
        let capacity = buffer.events.capacity();

        assert_eq!(buffer.drain().map(|e| e.len()), Some(64));
        assert!(buffer.is_empty());
        assert!(buffer.events.capacity() >= capacity);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffer = InputBuffer::new();
        for i in 0..64 {
            let key = if i % 2 == 0 { KeyCode::KeyA } else { KeyCode::KeyD };
            buffer.push(key_down(key));
        }
        let capacity = buffer.events.capacity();

        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.events.capacity(), capacity);
    }
}
