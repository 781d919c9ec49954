//! Legacy entry point name. Same game, same launcher.

use std::process::ExitCode;

fn main() -> ExitCode {
    runner_platformer::launch()
}
