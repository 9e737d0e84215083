mod config;
mod error;
mod repl;

use std::process::ExitCode;

use clap::Parser as ClapParser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tiny_interpreter::Evaluator;
use tiny_parser::parse;

use crate::config::Config;
use crate::error::Error;

/// Log to stderr. `RUST_LOG` picks the filter (default `warn`); `--verbose` forces `debug`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Parse and evaluate a whole source text once, printing the value of the last statement.
fn run_source(source: &str) -> Result<(), Error> {
    let prog = parse(source)?;
    let mut evaluator = Evaluator::new();

    if let Some(value) = evaluator.eval_program(&prog)? {
        println!("{}", value);
    }

    Ok(())
}

fn main() -> ExitCode {
    let config = Config::parse();
    init_tracing(config.verbose);

    let result = match (&config.eval, &config.file) {
        (Some(source), _) => run_source(source),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(Error::from)
            .and_then(|source| run_source(&source)),
        (None, None) => repl::repl(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
