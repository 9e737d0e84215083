use crate::span::Span;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// When a token does not have the shape the grammar requires at that point
    #[error("expected {expected} but got `{found}` (at {span})")]
    BadToken {
        expected: String,
        found: String,
        span: Span,
    },
    /// When the input ran out in the middle of a rule.
    /// Mostly used as a backtracking signal; only surfaces if nothing at all could be parsed.
    #[error("unexpected end of input")]
    EndOfInput,
    /// When the statements parsed fine but some text was left over
    #[error("could not parse `{0}`")]
    LeftoverString(String),
    /// When a number literal does not fit in an unsigned 32-bit integer
    #[error("number `{digits}` does not fit in 32 bits (at {span})")]
    NumberOverflow { digits: String, span: Span },
}

impl ParseError {
    /// Whether a speculative parse that failed with this error may be rolled back and retried
    /// as a different alternative.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ParseError::NumberOverflow { .. })
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::span::{BytePos, Span};

    #[test]
    fn test_messages() {
        let err = ParseError::BadToken {
            expected: "`then`".to_string(),
            found: "else".to_string(),
            span: Span::new(BytePos::new(5), BytePos::new(9)),
        };
        assert_eq!(err.to_string(), "expected `then` but got `else` (at 5:9)");

        assert_eq!(
            ParseError::LeftoverString("} x".to_string()).to_string(),
            "could not parse `} x`"
        );
    }

    #[test]
    fn test_overflow_is_fatal() {
        let overflow = ParseError::NumberOverflow {
            digits: "4294967296".to_string(),
            span: Span::new(BytePos::new(0), BytePos::new(10)),
        };
        assert!(!overflow.is_recoverable());
        assert!(ParseError::EndOfInput.is_recoverable());
    }
}
