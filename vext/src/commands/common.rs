//! Shared helpers for vext's subcommands.

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Resolves the effective entry file: an explicit CLI path wins, otherwise
/// the configured entry, relative to the current directory.
pub fn resolve_entry(config: &Config, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(&config.entry),
    }
}

/// Resolves the effective output directory the same way.
pub fn resolve_output_dir(config: &Config, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(&config.output_dir),
    }
}

pub mod output_messages {
    pub const ORGANIZING: &str = "organizing";
    pub const WROTE_ARTIFACT: &str = "wrote";
    pub const NO_DIAGNOSTICS: &str = "no diagnostics";
}
