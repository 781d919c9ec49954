//=========================================================================
// Transition Queue
//=========================================================================
//
// Scenes queue transitions here during updates; the scene manager
// applies them at the tick boundary, in FIFO order.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SceneKey, SceneTransition};

//=== Transition Queue ====================================================

#[derive(Debug)]
pub struct TransitionQueue<S: SceneKey> {
    queue: Vec<SceneTransition<S>>,
}

impl<S: SceneKey> TransitionQueue<S> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a transition for the next tick boundary.
    pub fn push(&mut self, transition: SceneTransition<S>) {
        if transition != SceneTransition::Empty {
            self.queue.push(transition);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all queued transitions, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SceneTransition<S>> {
        std::mem::take(&mut self.queue)
    }
}

impl<S: SceneKey> Default for TransitionQueue<S> {
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
    enum Key {
        A,
        B,
    }

    impl SceneKey for Key {}

    #[test]
    fn take_preserves_fifo_order_and_empties() {
        let mut queue = TransitionQueue::new();
        queue.push(SceneTransition::Push(Key::A));
        queue.push(SceneTransition::Replace(Key::A, Key::B));
        assert_eq!(queue.len(), 2);

        let taken = queue.take();
        assert_eq!(
            taken,
            vec![SceneTransition::Push(Key::A), SceneTransition::Replace(Key::A, Key::B)]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_transitions_are_not_queued() {
        let mut queue = TransitionQueue::<Key>::new();
        queue.push(SceneTransition::Empty);
        assert!(queue.is_empty());
    }
}
