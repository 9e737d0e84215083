use crate::error::{ParseError, ParseResult};
use crate::span::{BytePos, Span, WithSpan};
use crate::token::Token;

/// Splits source text into whitespace-separated tokens.
///
/// The delimiters `( ) { } ; ,` are always tokens on their own, so `(x)` and `( x )` read the same.
/// The current position can be saved and restored, which is what the parser backtracks with.
pub struct Tokeniser<'a> {
    source: &'a str,
    current_position: BytePos,
}

impl<'a> Tokeniser<'a> {
    pub fn new(source: &'a str) -> Tokeniser<'a> {
        Tokeniser {
            source,
            current_position: BytePos::new(0),
        }
    }

    /// Get the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.source[self.current_position.offset()..].chars().next()
    }

    /// Consume the next character.
    fn read_char(&mut self) -> Option<char> {
        let next = self.peek_char();
        if let Some(c) = next {
            self.current_position = self.current_position.shift(c);
        }
        next
    }

    /// Consume whitespace until a non-whitespace character is found.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.read_char();
            } else {
                break;
            }
        }
    }

    /// Read the next token, or fail with `EndOfInput` once only whitespace is left.
    pub fn next_token(&mut self) -> ParseResult<WithSpan<Token<'a>>> {
        self.skip_whitespace();

        let initial_position = self.current_position;

        match self.read_char() {
            Some(c) if is_delimiter(c) => {}
            Some(_) => {
                while let Some(c) = self.peek_char() {
                    if c.is_whitespace() || is_delimiter(c) {
                        break;
                    }
                    self.read_char();
                }
            }
            None => return Err(ParseError::EndOfInput),
        }

        let text = &self.source[initial_position.offset()..self.current_position.offset()];
        let span = Span::new(initial_position, self.current_position);

        Ok(WithSpan::new(Token::classify(text), span))
    }

    pub fn position(&self) -> BytePos {
        self.current_position
    }

    /// Rewind (or fast-forward) to a position previously returned by `position()`.
    pub fn restore(&mut self, position: BytePos) {
        self.current_position = position;
    }

    /// The unconsumed part of the source, without leading whitespace.
    pub fn remaining(&self) -> &'a str {
        self.source[self.current_position.offset()..].trim_start()
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}' | ';' | ',')
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::span::{BytePos, Span};
    use crate::token::Token;
    use crate::tokeniser::Tokeniser;

    #[test]
    fn test_whitespace_split() {
        let mut tok = Tokeniser::new("  let x\t=\n 12 ");

        assert_eq!(tok.next_token().unwrap().value, Token::Let);
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("x"));
        assert_eq!(tok.next_token().unwrap().value, Token::Equal);
        assert_eq!(tok.next_token().unwrap().value, Token::Number("12"));
        assert_eq!(tok.next_token(), Err(ParseError::EndOfInput));
        assert_eq!(tok.remaining(), "");
    }

    #[test]
    fn test_delimiters() {
        let mut tok = Tokeniser::new("(f x,y){a;}");

        assert_eq!(tok.next_token().unwrap().value, Token::LeftParen);
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("f"));
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("x"));
        assert_eq!(tok.next_token().unwrap().value, Token::Comma);
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("y"));
        assert_eq!(tok.next_token().unwrap().value, Token::RightParen);
        assert_eq!(tok.next_token().unwrap().value, Token::LeftBrace);
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("a"));
        assert_eq!(tok.next_token().unwrap().value, Token::Semicolon);
        assert_eq!(tok.next_token().unwrap().value, Token::RightBrace);
    }

    #[test]
    fn test_operators_need_whitespace() {
        let mut tok = Tokeniser::new("1+2 1 + 2");

        assert_eq!(tok.next_token().unwrap().value, Token::Unknown("1+2"));
        assert_eq!(tok.next_token().unwrap().value, Token::Number("1"));
        assert_eq!(tok.next_token().unwrap().value, Token::Plus);
    }

    #[test]
    fn test_save_restore() {
        let mut tok = Tokeniser::new("a b c");

        tok.next_token().unwrap();
        let saved = tok.position();
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("b"));
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("c"));
        assert_eq!(tok.remaining(), "");

        tok.restore(saved);
        assert_eq!(tok.remaining(), "b c");
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("b"));
    }

    #[test]
    fn test_spans() {
        let mut tok = Tokeniser::new("abc 12 (+");

        assert_eq!(
            tok.next_token().unwrap().span,
            Span::new(BytePos::new(0), BytePos::new(3))
        );
        assert_eq!(
            tok.next_token().unwrap().span,
            Span::new(BytePos::new(4), BytePos::new(6))
        );
        assert_eq!(
            tok.next_token().unwrap().span,
            Span::new(BytePos::new(7), BytePos::new(8))
        );
        assert_eq!(
            tok.next_token().unwrap().span,
            Span::new(BytePos::new(8), BytePos::new(9))
        );
    }

    #[test]
    fn test_non_ascii() {
        let mut tok = Tokeniser::new("é x");

        let first = tok.next_token().unwrap();
        assert_eq!(first.value, Token::Unknown("é"));
        assert_eq!(first.span, Span::new(BytePos::new(0), BytePos::new(2)));
        assert_eq!(tok.next_token().unwrap().value, Token::Identifier("x"));
    }
}
