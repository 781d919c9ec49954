//=========================================================================
// Input Events
//
// Portable keyboard events produced by the platform layer.
//
// The platform converts OS key events (winit) into these types; the
// logic thread never sees winit types. Only the keyboard is modelled:
// the game reads three held/pressed signals and a few menu keys.
//
// Event Flow:
// ```text
// winit KeyEvent
//       ↓  InputProcessor (platform)
//   InputEvent
//       ↓  PlatformEvent::Inputs (channel)
//   StateTracker (core)
//       ↓
//   Actions (MoveLeft, Jump, ...)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Physical location, not the produced character: `KeyA` is the same key
/// on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,

    /// Any key the platform layer does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level keyboard event.
///
/// Key repeat is filtered by the platform, so a `KeyDown` always marks a
/// real UP → DOWN transition at the OS level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },

    /// Unsupported event; ignored by the state tracker.
    Unidentified,
}

impl InputEvent {
    /// Returns the key carried by the event, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown { key } | Self::KeyUp { key } => Some(*key),
            Self::Unidentified => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
