use tiny_parser::ast::{BinaryOperator, Identifier};

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// When referencing an identifier that has not been bound
    #[error("identifier '{0}' not found")]
    UnknownVariable(Identifier),
    /// When an operand of an arithmetic or comparison operator is not a number (e.g. `f + 1`)
    #[error("unsupported operand type for {operator} operator: {} `{value}`", .value.typename())]
    NotANumber {
        operator: BinaryOperator,
        value: Value,
    },
    /// When something that is not a function is applied to an argument (e.g. `1 2`)
    #[error("{0} is not a function")]
    NotAFunction(Value),
    /// When an empty block (`{ }`) is used where a value is needed
    #[error("expression has no value")]
    NoValue,
}

pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use tiny_parser::ast::{BinaryOperator, Identifier};

    use crate::error::EvalError;
    use crate::value::Value;

    #[test]
    fn test_messages() {
        assert_eq!(
            EvalError::UnknownVariable(Identifier::from("foo")).to_string(),
            "identifier 'foo' not found"
        );
        assert_eq!(
            EvalError::NotAFunction(Value::Number(1)).to_string(),
            "1 is not a function"
        );
        assert_eq!(
            EvalError::NotANumber {
                operator: BinaryOperator::Plus,
                value: Value::Number(3),
            }
            .to_string(),
            "unsupported operand type for + operator: number `3`"
        );
    }
}
