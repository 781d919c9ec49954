//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the platform layer (winit) and the core logic
// thread. Platform backends can change without touching core code.
//
// Components:
// - `interface`: event types and the platform error
// - `event_collector`: core-side draining of platform events
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{CoreEvent, PlatformEvent};

pub use interface::PlatformError;
