//! Command-line surface: `keytally track` and `keytally stats`.

use crate::{stats, track};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use keytally_core::config::{Config, StatsMode};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "keytally", version, about = "Count key presses and see where your fingers go")]
pub struct Cli {
    /// Write debug logs to /tmp/keytally-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Read settings from PATH instead of ~/.config/keytally/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Count key presses in this terminal until Ctrl+c (or Esc).
    Track(TrackArgs),
    /// Show the recorded counts.
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Tally file to load and keep up to date.
    #[arg(long, short, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Seconds between periodic saves.
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Count Esc like any other key instead of stopping on it.
    #[arg(long)]
    pub no_exit_key: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Tally file to read.
    #[arg(long, short, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// How to present the counts.
    #[arg(long, short, value_enum)]
    pub mode: Option<ModeArg>,

    /// Only list the N most pressed keys (list mode).
    #[arg(long, short = 'n', value_name = "N")]
    pub top: Option<usize>,

    /// Never colour the output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    List,
    Keyboard,
}

impl From<ModeArg> for StatsMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::List => StatsMode::List,
            ModeArg::Keyboard => StatsMode::Keyboard,
        }
    }
}

/// Load the config named on the command line, or the user config file.
///
/// A broken config is not fatal: the error is returned alongside the
/// defaults so it can be logged once logging is up.
pub fn load_config(cli: &Cli) -> (Config, Option<anyhow::Error>) {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::defaults(), Some(e)),
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    match cli.command {
        Some(Command::Track(args)) => track::run(&args, config),
        Some(Command::Stats(args)) => stats::run(&args, config),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
