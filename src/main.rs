use std::process::ExitCode;

fn main() -> ExitCode {
    runner_platformer::launch()
}
