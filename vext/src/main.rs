//! Vext CLI - the ergonomic front end for the vexc organizer.
//!
//! Wraps `vexc-drv`'s one-file driver with project config (`vex.toml`),
//! a `build`/`check` subcommand split, and friendlier diagnostics.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    build::{run_build, BuildArgs},
    check::{run_check, CheckArgs},
};
use config::Config;
use error::{Result, VextError};

/// Vex - organize and check Vex-language projects
#[derive(Parser, Debug)]
#[command(name = "vext")]
#[command(author = "Vex Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for Vex projects", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "VEXT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "VEXT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "VEXT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Organize a project's entry file and write the rewritten program tree
    Build(BuildCommandArgs),

    /// Run the front-end pipeline and report diagnostics without writing output
    Check(CheckCommandArgs),
}

#[derive(Parser, Debug)]
struct BuildCommandArgs {
    /// Entry file (default: from config)
    #[arg(short, long)]
    entry: Option<PathBuf>,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckCommandArgs {
    /// Entry file (default: from config)
    #[arg(short, long)]
    entry: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;

    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.verbose, config)
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| VextError::Config(format!("failed to initialize logging: {e}")))?;

    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Build(args) => run_build(
            BuildArgs { verbose, entry: args.entry, output: args.output },
            config,
        ),
        Commands::Check(args) => run_check(CheckArgs { verbose, entry: args.entry }, config),
    }
}
