//=========================================================================
// Launcher
//=========================================================================
//
// The one `launch()` both binaries call.
//
//   CLI → logging → config (+ overrides) → engine + game → run
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;
use std::process::ExitCode;

//=== External Dependencies ===============================================

use clap::Parser;
use log::{error, info};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

//=== Internal Dependencies ===============================================

use crate::core::PlatformError;
use crate::engine::EngineBuilder;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::{self, GameAction, GameScene};

//=== CLI =================================================================

#[derive(Debug, Parser)]
#[command(name = "platformer", version, about = "Minimal 2D runner platformer")]
pub struct Cli {
    /// Game configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Level seed, overrides the config file
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Simulation ticks per second, overrides the config file
    #[arg(long)]
    pub tps: Option<f64>,
}

//=== GameError ===========================================================

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=== Launch ==============================================================

/// Parses the command line, runs the game and maps the outcome to an
/// exit code.
pub fn launch() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the default `info`
/// level; `log` records are bridged in.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();
}

/// Runs the game until the window closes or the player quits.
pub fn run(cli: Cli) -> Result<(), GameError> {
    let (config, seed) = prepare(&cli)?;
    info!("Starting \"{}\" (seed {}, {} TPS)", config.window.title, seed, config.window.tps);

    let mut setup = Ok(());
    let engine = EngineBuilder::<GameScene, GameAction>::new()
        .with_tps(config.window.tps)
        .with_title(config.window.title.clone())
        .with_window_size(config.window.width, config.window.height)
        .build()
        .init(|systems| setup = game::register(systems, &config, seed));
    setup.map_err(ConfigError::from)?;

    engine.run()?;
    Ok(())
}

/// Loads the config, applies CLI overrides and picks the seed.
fn prepare(cli: &Cli) -> Result<(GameConfig, u64), ConfigError> {
    let mut config = GameConfig::load(&cli.config)?;

    if let Some(tps) = cli.tps {
        config.window.tps = tps;
        config.validate()?;
    }

    let seed = cli.seed.or(config.seed).unwrap_or_else(rand::random);
    Ok((config, seed))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn missing_config() -> PathBuf {
        std::env::temp_dir().join("runner_platformer_launcher_missing.json")
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["platformer"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.tps, None);
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::try_parse_from(["platformer", "-c", "other.json", "--seed", "9", "--tps", "120"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.json"));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.tps, Some(120.0));
    }

    #[test]
    fn prepare_prefers_cli_seed_and_tps() {
        let cli = Cli {
            config: missing_config(),
            seed: Some(3),
            tps: Some(30.0),
        };

        let (config, seed) = prepare(&cli).unwrap();
        assert_eq!(seed, 3);
        assert_eq!(config.window.tps, 30.0);
    }

    #[test]
    fn prepare_rejects_bad_tps() {
        let cli = Cli {
            config: missing_config(),
            seed: None,
            tps: Some(-1.0),
        };
        assert!(matches!(prepare(&cli), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn platform_error_converts_to_game_error() {
        let err: GameError =
            PlatformError::EventLoopExecution(winit::error::EventLoopError::ExitFailure(2)).into();
        assert!(matches!(err, GameError::Platform(_)));
        assert!(err.to_string().starts_with("event loop error"));
    }

    #[test]
    fn config_error_converts_to_game_error() {
        let err: GameError = ConfigError::Invalid("bad".into()).into();
        assert_eq!(err.to_string(), "invalid config: bad");
    }
}
