use std::fmt;

/// A whitespace-delimited chunk of source text, classified by shape.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token<'a> {
    // Operators
    Plus,
    Minus,
    Equal,
    EqualEqual,
    LessThan,
    GreaterThan,

    // Delimiters
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,

    // Identifiers & Literals
    Identifier(&'a str),
    /// A run of digits, not yet range-checked
    Number(&'a str),

    // Keywords
    Let,
    Fn,
    If,
    Then,
    Else,

    /// Anything that fits none of the above (e.g. `1+2` or `$`)
    Unknown(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a raw token produced by the tokeniser.
    pub fn classify(text: &'a str) -> Token<'a> {
        if let Some(token) = Token::lookup_keyword(text).or_else(|| Token::lookup_symbol(text)) {
            return token;
        }

        if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
            Token::Number(text)
        } else if is_identifier(text) {
            Token::Identifier(text)
        } else {
            Token::Unknown(text)
        }
    }

    /// Get the Token for the given keyword, if valid.
    pub fn lookup_keyword(s: &str) -> Option<Token<'static>> {
        use Token::*;

        match s {
            "let" => Some(Let),
            "fn" => Some(Fn),
            "if" => Some(If),
            "then" => Some(Then),
            "else" => Some(Else),
            _ => None,
        }
    }

    fn lookup_symbol(s: &str) -> Option<Token<'static>> {
        use Token::*;

        match s {
            "+" => Some(Plus),
            "-" => Some(Minus),
            "=" => Some(Equal),
            "==" => Some(EqualEqual),
            "<" => Some(LessThan),
            ">" => Some(GreaterThan),
            "," => Some(Comma),
            ";" => Some(Semicolon),
            "(" => Some(LeftParen),
            ")" => Some(RightParen),
            "{" => Some(LeftBrace),
            "}" => Some(RightBrace),
            _ => None,
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Token::*;

        match self {
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            EqualEqual => write!(f, "=="),
            LessThan => write!(f, "<"),
            GreaterThan => write!(f, ">"),

            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
            LeftParen => write!(f, "("),
            RightParen => write!(f, ")"),
            LeftBrace => write!(f, "{{"),
            RightBrace => write!(f, "}}"),

            Identifier(name) => write!(f, "{}", name),
            Number(digits) => write!(f, "{}", digits),

            Let => write!(f, "let"),
            Fn => write!(f, "fn"),
            If => write!(f, "if"),
            Then => write!(f, "then"),
            Else => write!(f, "else"),

            Unknown(text) => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::Token;

    #[test]
    fn test_keywords() {
        assert_eq!(Token::classify("let"), Token::Let);
        assert_eq!(Token::classify("fn"), Token::Fn);
        assert_eq!(Token::classify("if"), Token::If);
        assert_eq!(Token::classify("then"), Token::Then);
        assert_eq!(Token::classify("else"), Token::Else);
        // Keywords are whole tokens only
        assert_eq!(Token::classify("lets"), Token::Identifier("lets"));
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(Token::classify("x"), Token::Identifier("x"));
        assert_eq!(Token::classify("_tmp1"), Token::Identifier("_tmp1"));
        assert_eq!(Token::classify("snake_Case9"), Token::Identifier("snake_Case9"));
        assert_eq!(Token::classify("1abc"), Token::Unknown("1abc"));
        assert_eq!(Token::classify("a-b"), Token::Unknown("a-b"));
    }

    #[test]
    fn test_numbers_and_symbols() {
        assert_eq!(Token::classify("0"), Token::Number("0"));
        assert_eq!(Token::classify("012"), Token::Number("012"));
        assert_eq!(Token::classify("=="), Token::EqualEqual);
        assert_eq!(Token::classify("="), Token::Equal);
        assert_eq!(Token::classify("<="), Token::Unknown("<="));
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::LeftBrace.to_string(), "{");
        assert_eq!(Token::RightBrace.to_string(), "}");
        assert_eq!(Token::Number("42").to_string(), "42");
    }
}
