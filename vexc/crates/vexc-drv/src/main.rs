use std::process::ExitCode;

use vexc_drv::{Config, DriverError, Session};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::parse(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("vexc: {err}");
            return ExitCode::FAILURE;
        }
    };

    let session = Session::new(config);
    match session.run() {
        Ok(outcome) => {
            if !outcome.output.is_empty() {
                println!("{}", outcome.output);
            }
            if !outcome.diagnostics.is_empty() {
                eprint!("{}", outcome.diagnostics);
            }
            ExitCode::SUCCESS
        }
        Err(DriverError::MissingMain) => {
            eprintln!("vexc: {}", DriverError::MissingMain);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("vexc: {err}");
            ExitCode::FAILURE
        }
    }
}
