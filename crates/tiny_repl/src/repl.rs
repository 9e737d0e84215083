use rustyline::error::ReadlineError;
use rustyline::Editor;
use tracing::{debug, warn};

use tiny_interpreter::{Environment, Evaluator};
use tiny_parser::parse;

use crate::config::Config;
use crate::error::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn repl(config: &Config) -> Result<(), Error> {
    println!("tiny v{}", VERSION);

    // One evaluator for the whole session, so bindings carry over from line to line
    let mut evaluator = Evaluator::new();

    // `()` can be used when no completer is required
    let mut rl = Editor::<()>::new();
    if let Some(path) = config.history_path() {
        if let Err(err) = rl.load_history(path) {
            debug!(path = %path.display(), error = %err, "no history loaded");
        }
    }

    loop {
        let readline = rl.readline(&config.prompt);
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "exit" || trimmed == "quit" {
                    break;
                }
                // Skip empty lines
                else if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(line.as_str());
                if let Some(path) = config.history_path() {
                    if let Err(err) = rl.save_history(path) {
                        warn!(path = %path.display(), error = %err, "could not save history");
                    }
                }

                if trimmed == ":env" {
                    print_environment(evaluator.environment());
                    continue;
                }

                match parse(&line) {
                    Ok(prog) => match evaluator.eval_program(&prog) {
                        Ok(Some(value)) => println!("{}", value),
                        Ok(None) => {}
                        Err(err) => println!("Error: {}", err),
                    },
                    Err(err) => println!("Parse error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn print_environment(env: &Environment) {
    if env.is_empty() {
        println!("(no bindings)");
    }

    for (name, value) in env.iter() {
        println!("{} = {}", name, value);
    }
}
