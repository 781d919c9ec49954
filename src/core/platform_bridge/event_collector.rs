//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side receiver for platform events, drained once per tick.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_tick() → input batches → TickControl
//
// Draining is bounded so an input flood cannot starve the simulation;
// the leftover events are picked up next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
    focus_lost: bool,
}

impl EventCollector {
    const MAX_EVENTS_PER_TICK: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
            focus_lost: false,
        }
    }

    /// Drains pending platform events for this tick.
    pub(crate) fn collect_tick(&mut self) -> TickControl {
        self.input_batches.clear();
        self.focus_lost = false;

        let mut drained = 0;
        while drained < Self::MAX_EVENTS_PER_TICK {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_TICK {
            warn!("Event queue backlog: drained {} events this tick", drained);
        }

        TickControl::Continue
    }

    #[cfg(test)]
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    pub(crate) fn focus_lost(&self) -> bool {
        self.focus_lost
    }

    /// Moves this tick's batches out, leaving an empty vec behind.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs(batch) => {
                if !batch.is_empty() {
                    self.input_batches.push(batch);
                }
                TickControl::Continue
            }
            PlatformEvent::FocusLost => {
                // Keys pressed before the focus loss belong to the old
                // focus session and are released along with it
                self.input_batches.clear();
                self.focus_lost = true;
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::unbounded;

    fn space_down() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space }
    }

    #[test]
    fn empty_queue_continues_without_batches() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_tick(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn aggregates_multiple_batches_in_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![space_down()])).unwrap();
        tx.send(PlatformEvent::Inputs(vec![])).unwrap();
        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyUp { key: KeyCode::Space }])).unwrap();

        assert_eq!(collector.collect_tick(), TickControl::Continue);
        let batches = collector.take_batches();
        assert_eq!(batches.len(), 2, "Empty batches are dropped");
        assert_eq!(batches[0], vec![space_down()]);
    }

    #[test]
    fn window_closed_exits() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        tx.send(PlatformEvent::WindowClosed).unwrap();
        assert_eq!(collector.collect_tick(), TickControl::Exit);
    }

    #[test]
    fn disconnect_exits() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);
        assert_eq!(collector.collect_tick(), TickControl::Exit);
    }

    #[test]
    fn focus_loss_discards_earlier_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![space_down()])).unwrap();
        tx.send(PlatformEvent::FocusLost).unwrap();

        collector.collect_tick();
        assert!(collector.focus_lost());
        assert!(collector.batches().is_empty());

        // Flag does not stick to the next tick
        collector.collect_tick();
        assert!(!collector.focus_lost());
    }

    #[test]
    fn drain_is_bounded_per_tick() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..(EventCollector::MAX_EVENTS_PER_TICK + 5) {
            tx.send(PlatformEvent::Inputs(vec![space_down()])).unwrap();
        }

        collector.collect_tick();
        assert_eq!(collector.batches().len(), EventCollector::MAX_EVENTS_PER_TICK);

        collector.collect_tick();
        assert_eq!(collector.batches().len(), 5);
    }
}
