use std::{fmt::Display, rc::Rc};

use tiny_parser::ast::{write_function, Expression, Identifier};

use crate::environment::Environment;

/// The result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(u32),
    Closure(Rc<Closure>),
}

impl Value {
    pub fn typename(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Closure(_) => "function",
        }
    }

    /// Only the number `0` is false; functions always count as true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(value) => *value != 0,
            Value::Closure(_) => true,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{}", value),
            Value::Closure(closure) => write!(f, "{}", closure),
        }
    }
}

/// A function that still waits for `params`, one argument at a time.
#[derive(Debug, PartialEq)]
pub struct Closure {
    /// Parameters not yet applied. Never empty: applying the last one runs the body instead.
    pub params: Vec<Identifier>,
    pub body: Rc<Expression>,
    /// Bindings visible where the function was defined, plus the arguments applied so far
    pub env: Environment,
}

impl Display for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_function(f, &self.params, &self.body)
    }
}
