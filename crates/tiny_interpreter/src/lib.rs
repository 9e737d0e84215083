mod environment;
mod error;
mod evaluator;
pub mod value;

pub use environment::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use value::{Closure, Value};
