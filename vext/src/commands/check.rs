//! The `check` subcommand: runs the front-end pipeline over a project's
//! entry file and reports diagnostics without writing any artifact.

use std::path::PathBuf;

use vexc_drv::{Config as DrvConfig, DriverError, Emit, Session};

use crate::commands::common::{output_messages, resolve_entry};
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{Result, VextError};

#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub verbose: bool,
    pub entry: Option<PathBuf>,
}

pub struct CheckCommand {
    args: CheckArgs,
    config: Config,
}

impl CheckCommand {
    pub fn with_config(args: CheckArgs, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(&self) -> Result<()> {
        let entry = resolve_entry(&self.config, self.args.entry.as_deref());
        tracing::info!(entry = %entry.display(), "{}", output_messages::ORGANIZING);
        let drv_config = DrvConfig { entry: entry.clone(), emit: Emit::None };
        let session = Session::new(drv_config);

        let outcome = session.run().map_err(|err| match err {
            DriverError::MissingMain => VextError::Compilation(err.to_string()),
            DriverError::Io { .. } => VextError::Validation(err.to_string()),
            DriverError::Config(_) => VextError::Config(err.to_string()),
        })?;

        if self.args.verbose {
            eprintln!("checked {}", entry.display());
        }
        if outcome.diagnostics.is_empty() {
            tracing::debug!("{}", output_messages::NO_DIAGNOSTICS);
            if self.args.verbose {
                eprintln!("{}", output_messages::NO_DIAGNOSTICS);
            }
        } else {
            eprint!("{}", outcome.diagnostics);
        }

        Ok(())
    }
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self { args, config: Config::default() }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "check"
    }
}

impl CommandDescription for CheckCommand {
    fn description() -> &'static str {
        "Run the front-end pipeline and report diagnostics without writing output"
    }
}

pub fn run_check(args: CheckArgs, config: Config) -> Result<()> {
    CheckCommand::with_config(args, config).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_entry(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("main.vex");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn checking_a_clean_project_succeeds() {
        let project = TempDir::new().unwrap();
        let entry = write_entry(&project, "class Main {\n void main() {\n return 0\n }\n}\n");

        let args = CheckArgs { verbose: false, entry: Some(entry) };
        assert!(run_check(args, Config::default()).is_ok());
    }

    #[test]
    fn checking_a_project_without_main_fails() {
        let project = TempDir::new().unwrap();
        let entry = write_entry(&project, "class Other {\n}\n");

        let args = CheckArgs { verbose: false, entry: Some(entry) };
        let result = run_check(args, Config::default());
        assert!(matches!(result, Err(VextError::Compilation(_))));
    }

    #[test]
    fn command_name_is_check() {
        assert_eq!(<CheckCommand as Command>::name(), "check");
    }
}
