//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use runner_platformer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{Action, InputContext, KeyCode};

// Scene system
pub use crate::core::scene::{Scene, SceneKey, SceneTransition};

// Rendering boundary
pub use crate::core::geometry::Rect;
pub use crate::core::render::{FrameSnapshot, Presenter, SpriteKind};
