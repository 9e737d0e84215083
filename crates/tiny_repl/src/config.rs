use std::path::{Path, PathBuf};

use clap::Parser as ClapParser;

#[derive(ClapParser, Debug)]
#[clap(author, version, about = "Interpreter for a tiny curried functional language", long_about = None)]
pub struct Config {
    #[clap(help = "Source file to run instead of starting the REPL")]
    pub file: Option<PathBuf>,

    #[clap(short, long, help = "Evaluate the given source, print the result and exit")]
    pub eval: Option<String>,

    #[clap(long, default_value = ".tiny-interp-history", help = "File the REPL history is kept in")]
    pub history: PathBuf,
    #[clap(long, help = "Neither load nor save REPL history")]
    pub no_history: bool,
    #[clap(long, default_value = "> ", help = "REPL prompt")]
    pub prompt: String,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

impl Config {
    pub fn history_path(&self) -> Option<&Path> {
        if self.no_history {
            None
        } else {
            Some(self.history.as_path())
        }
    }
}
