use rustyline::error::ReadlineError;
use tiny_interpreter::EvalError;
use tiny_parser::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Eval(#[from] EvalError),
    #[error("could not read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("line editor failed: {0}")]
    Readline(#[from] ReadlineError),
}
