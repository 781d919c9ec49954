//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages exchanged between the platform (main) thread and the logic
// thread, plus the platform error type.
//
//   platform ──PlatformEvent──> core
//   platform <──CoreEvent────── core
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;
use crate::core::render::FrameSnapshot;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Keyboard events buffered during one redraw.
    Inputs(Vec<InputEvent>),

    /// The window lost keyboard focus; held keys must be released.
    FocusLost,

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Events sent from core back to the platform.
#[derive(Debug, Clone)]
pub(crate) enum CoreEvent {
    /// Snapshot of a finished tick.
    Frame(FrameSnapshot),

    /// The game asked to quit (or ran out of scenes).
    Shutdown,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors. All are fatal.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[source] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}
