//=========================================================================
// Runner Platformer: Library Root
//
// A minimal 2D platformer on a small fixed-tick engine.
//
// Responsibilities:
// - `core`: engine systems (input, scenes, geometry, frame snapshots)
// - `engine`: builder and runtime that wires the logic thread to winit
// - `game`: the platformer itself (config, world, physics, scenes)
// - `launcher`: CLI, logging and the shared `launch()` entry point
//
// Typical usage:
// ```no_run
// fn main() -> std::process::ExitCode {
//     runner_platformer::launch()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod core;
pub mod game;
pub mod launcher;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` holds the winit integration and is not part of the API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use launcher::{launch, GameError};
