//! The `build` subcommand: organizes one project's entry file and writes
//! the rewritten program tree to the output directory.

use std::path::PathBuf;
use std::time::Instant;

use vexc_drv::{Config as DrvConfig, DriverError, Emit, Session};

use crate::commands::common::{output_messages, resolve_entry, resolve_output_dir};
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{Result, VextError};

#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub verbose: bool,
    pub entry: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub struct BuildCommand {
    args: BuildArgs,
    config: Config,
}

impl BuildCommand {
    pub fn with_config(args: BuildArgs, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(&self) -> Result<()> {
        let start = Instant::now();
        let entry = resolve_entry(&self.config, self.args.entry.as_deref());
        let output_dir = resolve_output_dir(&self.config, self.args.output.as_deref());

        tracing::info!(entry = %entry.display(), "{}", output_messages::ORGANIZING);
        let drv_config = DrvConfig { entry: entry.clone(), emit: Emit::Program };
        let session = Session::new(drv_config);

        let outcome = session.run().map_err(|err| match err {
            DriverError::MissingMain => VextError::Compilation(err.to_string()),
            DriverError::Io { .. } => VextError::Validation(err.to_string()),
            DriverError::Config(_) => VextError::Config(err.to_string()),
        })?;

        std::fs::create_dir_all(&output_dir)?;
        let artifact = output_dir.join("organized.txt");
        std::fs::write(&artifact, &outcome.output)?;
        tracing::debug!(artifact = %artifact.display(), "{}", output_messages::WROTE_ARTIFACT);

        if self.args.verbose {
            eprintln!("organized {} -> {}", entry.display(), artifact.display());
            eprintln!("build completed in {:.2}s", start.elapsed().as_secs_f64());
        }
        if outcome.diagnostics.is_empty() {
            tracing::debug!("{}", output_messages::NO_DIAGNOSTICS);
        } else {
            eprint!("{}", outcome.diagnostics);
        }

        Ok(())
    }
}

impl Command for BuildCommand {
    type Args = BuildArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self { args, config: Config::default() }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "build"
    }
}

impl CommandDescription for BuildCommand {
    fn description() -> &'static str {
        "Organize a project's entry file and write the rewritten program tree"
    }
}

pub fn run_build(args: BuildArgs, config: Config) -> Result<()> {
    BuildCommand::with_config(args, config).run()
}
