//=========================================================================
// Action Trait & Input Context
//=========================================================================
//
// Actions are game-defined identifiers the engine routes without
// interpreting. Contexts let the same key mean different things in
// different scenes (Escape pauses during play, resumes while paused).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// ```
/// use runner_platformer::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MyAction { Jump, Pause }
///
/// impl Action for MyAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== InputContext ========================================================

/// Selects which set of bindings is active.
///
/// `Primary` is the gameplay context. Others are numbered:
///
/// ```
/// # use runner_platformer::prelude::*;
/// const PAUSE_MENU: InputContext = InputContext::custom(0);
/// assert_ne!(PAUSE_MENU, InputContext::Primary);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    #[default]
    Primary,
    Custom(u32),
}

impl InputContext {
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
