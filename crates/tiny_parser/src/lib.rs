pub mod ast;
pub mod error;
pub mod parser;
pub mod span;
pub mod token;
pub mod tokeniser;

pub use error::{ParseError, ParseResult};
pub use parser::{parse, Parser};
