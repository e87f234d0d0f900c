//! vexc-drv — the raw compiler driver.
//!
//! `vexc <entry-file> [--emit-tokens|--emit-lines|--emit-program]` runs the
//! whole front end against one entry file: tokenize, normalize, assemble
//! into Lines, organize into a Program, then rewrite operators and number
//! names. With no `--emit-*` flag it just runs the pipeline and reports
//! diagnostics plus whether a `Main.main` was located (spec.md §6).
//!
//! This is the thin, flag-poor driver meant to be called from build
//! tooling. `vext` (a sibling crate) wraps it with an ergonomic CLI,
//! project config, and friendlier output.

use std::fmt;
use std::path::PathBuf;

use vexc_par::{Class, ClassId, Program};
use vexc_util::{Handler, SourceLoadError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emit {
    #[default]
    None,
    Tokens,
    Lines,
    Program,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub entry: PathBuf,
    pub emit: Emit,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingEntry,
    UnknownFlag(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEntry => {
                write!(f, "usage: vexc <entry-file> [--emit-tokens|--emit-lines|--emit-program]")
            }
            ConfigError::UnknownFlag(flag) => write!(f, "unrecognized flag `{flag}`"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Config, ConfigError> {
        let mut entry = None;
        let mut emit = Emit::None;
        for arg in args {
            match arg.as_str() {
                "--emit-tokens" => emit = Emit::Tokens,
                "--emit-lines" => emit = Emit::Lines,
                "--emit-program" => emit = Emit::Program,
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()))
                }
                other => entry = Some(PathBuf::from(other)),
            }
        }
        let entry = entry.ok_or(ConfigError::MissingEntry)?;
        Ok(Config { entry, emit })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not read `{path}`: {source}")]
    Io { path: PathBuf, #[source] source: SourceLoadError },
    #[error("no top-level class `Main` with a function `main` was found")]
    MissingMain,
}

/// What a run produced: the requested `--emit-*` text (empty when none was
/// requested), the rendered diagnostic blocks (empty when there were none),
/// and whether `Main.main` was located. Printing and exit-code selection are
/// `main`'s job, not this library's (spec.md §6's contract is: 0 on success,
/// non-zero on fatal I/O or a missing `Main`, diagnostics alone don't fail
/// the run since the organizer always recovers and keeps going).
pub struct RunOutcome {
    pub output: String,
    pub diagnostics: String,
    pub main_found: bool,
}

pub struct Session {
    config: Config,
    handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, handler: Handler::new() }
    }

    pub fn run(&self) -> Result<RunOutcome, DriverError> {
        match self.config.emit {
            Emit::Tokens => self.emit_tokens(),
            Emit::Lines => self.emit_lines(),
            Emit::Program | Emit::None => self.run_pipeline(),
        }
    }

    fn emit_tokens(&self) -> Result<RunOutcome, DriverError> {
        tracing::debug!(entry = %self.config.entry.display(), "tokenizing");
        let text = vexc_lex::source::load(&self.config.entry)
            .map_err(|source| DriverError::Io { path: self.config.entry.clone(), source })?;
        let tokens = vexc_lex::tokenize(&text);
        let output = tokens
            .iter()
            .filter(|t| !t.is_breadcrumb())
            .map(|t| t.text())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(RunOutcome { output, diagnostics: String::new(), main_found: true })
    }

    fn emit_lines(&self) -> Result<RunOutcome, DriverError> {
        tracing::debug!(entry = %self.config.entry.display(), "assembling lines");
        let lines = vexc_lex::lex_file(&self.config.entry)
            .map_err(|source| DriverError::Io { path: self.config.entry.clone(), source })?;
        let output = lines
            .iter()
            .map(|line| line.lexemes.iter().map(|t| t.text()).collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(RunOutcome { output, diagnostics: String::new(), main_found: true })
    }

    fn run_pipeline(&self) -> Result<RunOutcome, DriverError> {
        tracing::debug!(entry = %self.config.entry.display(), "checking entry file is readable");
        vexc_lex::source::load(&self.config.entry)
            .map_err(|source| DriverError::Io { path: self.config.entry.clone(), source })?;

        tracing::info!(entry = %self.config.entry.display(), "organizing");
        let (mut program, main_found, sources) = vexc_par::build_program(&self.config.entry, &self.handler);

        tracing::info!("rewriting operators and numbering names");
        vexc_sem::rewrite_program(&mut program);

        let output = if self.config.emit == Emit::Program {
            render_program(&program)
        } else {
            String::new()
        };

        if !main_found {
            return Err(DriverError::MissingMain);
        }

        Ok(RunOutcome { output, diagnostics: self.handler.render_all_with(&sources), main_found })
    }
}

fn render_program(program: &Program) -> String {
    let mut out = String::new();
    for &id in &program.top_level {
        render_class(program, id, 0, &mut out);
    }
    out
}

fn render_class(program: &Program, id: ClassId, depth: usize, out: &mut String) {
    let class: &Class = &program.classes[id];
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}class {}\n", class.name));
    for function in &class.functions {
        out.push_str(&format!("{indent}  fn {}\n", function.name));
        for line in &function.body.lines {
            let text = line.lexemes.iter().map(|t| t.text()).collect::<Vec<_>>().join(" ");
            out.push_str(&format!("{indent}    {text}\n"));
        }
    }
    for &sub in &class.subclasses {
        render_class(program, sub, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_entry_and_emit_flag() {
        let config = Config::parse(vec!["a.vex".to_string(), "--emit-tokens".to_string()]).unwrap();
        assert_eq!(config.entry, PathBuf::from("a.vex"));
        assert_eq!(config.emit, Emit::Tokens);
    }

    #[test]
    fn missing_entry_is_an_error() {
        assert!(Config::parse(vec!["--emit-tokens".to_string()]).is_err());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(Config::parse(vec!["a.vex".to_string(), "--bogus".to_string()]).is_err());
    }

    #[test]
    fn minimal_class_runs_clean_with_main_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(dir.path(), "main.vex", "class Main {\n void main() {\n return 0\n }\n}\n");
        let session = Session::new(Config { entry: path, emit: Emit::Program });
        let outcome = session.run().unwrap();
        assert!(outcome.main_found);
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.output.contains("class Main"));
        assert!(outcome.output.contains("fn main"));
        assert!(outcome.output.contains("return 0"));
    }

    #[test]
    fn missing_main_is_a_driver_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(dir.path(), "main.vex", "class Other {\n}\n");
        let session = Session::new(Config { entry: path, emit: Emit::None });
        let err = session.run().unwrap_err();
        assert!(matches!(err, DriverError::MissingMain));
    }

    #[test]
    fn diagnostics_render_with_recovered_source_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(dir.path(), "main.vex", "class Main {\n void main() {\n return 0\n }\n}\nbogus\n");
        let session = Session::new(Config { entry: path, emit: Emit::Program });
        let outcome = session.run().unwrap();
        assert!(!outcome.diagnostics.is_empty());
        assert!(outcome.diagnostics.contains("source: bogus"));
        assert!(!outcome.diagnostics.contains("<source unavailable>"));
    }

    #[test]
    fn nonexistent_entry_is_an_io_error() {
        let session = Session::new(Config {
            entry: PathBuf::from("/does/not/exist.vex"),
            emit: Emit::Tokens,
        });
        assert!(session.run().is_err());
    }
}
