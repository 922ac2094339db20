use std::io;

use clap::Parser;
use tile_plane::PlaneConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};
use crate::interpreter::{run as run_session, Interpreter, RunOptions};

#[derive(Debug, Parser)]
#[command(
    name = "tileplane",
    about = "Line-oriented interpreter for a sparse tile plane with propagation rules",
    version
)]
pub struct Cli {
    /// Intensity given to a dark cell when a rule lights it.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub default_intensity: i32,

    /// Echo every command before its output.
    #[arg(long)]
    pub echo: bool,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level())?;

    let config = PlaneConfig {
        default_intensity: cli.default_intensity,
    };
    info!(?config, echo = cli.echo, "starting interpreter");

    let mut interpreter = Interpreter::with_config(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let options = RunOptions { echo: cli.echo };

    let stats = run_session(&mut interpreter, stdin.lock(), &mut out, &options)?;
    info!(
        commands = stats.commands,
        errors = stats.errors,
        quit = stats.quit,
        "interpreter stopped"
    );
    Ok(())
}

/// Log to stderr so stdout carries only command output.
fn init_logging(default_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::Logging {
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["tileplane", "--default-intensity", "-3", "--echo", "-vv"])
            .unwrap();
        assert_eq!(cli.default_intensity, -3);
        assert!(cli.echo);
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["tileplane"]).unwrap();
        assert_eq!(cli.default_intensity, 1);
        assert!(!cli.echo);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn rejects_bad_intensity() {
        assert!(Cli::try_parse_from(["tileplane", "--default-intensity", "lots"]).is_err());
    }
}
