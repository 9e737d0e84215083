use std::rc::Rc;

use tracing::{debug, trace};

use crate::ast::{
    AppExpression, BinaryOperator, BinopExpression, BlockExpression, Expression, FunctionLiteral,
    Identifier, IfExpression, Program, Statement,
};
use crate::error::{ParseError, ParseResult};
use crate::span::{BytePos, Span, WithSpan};
use crate::token::Token;
use crate::tokeniser::Tokeniser;

/// Parse a whole source text into its top-level statements.
pub fn parse(source: &str) -> ParseResult<Program> {
    Parser::new(Tokeniser::new(source)).parse_program()
}

/// Recursive descent parser that disambiguates by trying the longer alternative first
/// and rewinding the tokeniser when it does not work out.
pub struct Parser<'a> {
    tokeniser: Tokeniser<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokeniser: Tokeniser<'a>) -> Parser<'a> {
        Parser { tokeniser }
    }

    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let statements = self.parse_statements()?;
        let rest = self.tokeniser.remaining();

        if rest.is_empty() {
            debug!(statements = statements.len(), "parsed program");
            return Ok(Program { statements });
        }

        // Input that ends half-way through the very first statement (e.g. `let x =`)
        // reports that, rather than echoing the whole line back as leftover.
        if statements.is_empty() {
            if let Err(ParseError::EndOfInput) = self.parse_statement() {
                return Err(ParseError::EndOfInput);
            }
        }

        Err(ParseError::LeftoverString(rest.to_owned()))
    }

    /// Run `rule` speculatively.
    ///
    /// On a recoverable failure the tokeniser is put back where it was and `None` is returned,
    /// so the caller can fall back to another alternative.
    fn attempt<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Option<T>> {
        let saved = self.tokeniser.position();

        match rule(self) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_recoverable() => {
                trace!(position = %saved, %error, "backtracking");
                self.tokeniser.restore(saved);
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// `statement (";" statement)* ";"?`, where even the first statement is optional.
    fn parse_statements(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();

        match self.attempt(Self::parse_statement)? {
            Some(statement) => statements.push(statement),
            None => return Ok(statements),
        }

        while let Some(statement) = self.attempt(|p| {
            p.expect(Token::Semicolon)?;
            p.parse_statement()
        })? {
            statements.push(statement);
        }

        // Trailing semicolon
        self.attempt(|p| p.expect(Token::Semicolon))?;

        Ok(statements)
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.peek_token()?.value {
            Token::Let => self.parse_assignment(),
            _ => Ok(Statement::Expression(self.parse_expression()?)),
        }
    }

    fn parse_assignment(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Let)?;
        let name = self.expect_identifier()?;
        self.expect(Token::Equal)?;
        let body = self.parse_expression()?;

        Ok(Statement::Assignment { name, body })
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        match self.peek_token()?.value {
            Token::Fn => self.parse_function(),
            Token::If => self.parse_if(),
            _ => self.parse_infix(),
        }
    }

    /// `"fn" vars+ expr`
    ///
    /// Parameter groups are read greedily, stopping at a group that repeats a name already taken.
    /// If whatever follows the groups cannot begin an expression, the last group is the start of
    /// the body instead. So `fn x y { x - y }` takes two parameters while `fn x y` is the
    /// one-parameter function returning `y`. The body is parsed exactly once.
    fn parse_function(&mut self) -> ParseResult<Expression> {
        self.expect(Token::Fn)?;

        let mut params = vec![];
        // Where each group starts, and how many parameters came before it
        let mut groups: Vec<(BytePos, usize)> = vec![];
        loop {
            let start = self.tokeniser.position();
            let group = if groups.is_empty() {
                self.parse_vars()?
            } else {
                match self.attempt(Self::parse_vars)? {
                    Some(group) => group,
                    None => break,
                }
            };

            if group.iter().any(|name| params.contains(name)) {
                trace!(position = %start, "repeated parameter name, parameters end here");
                self.tokeniser.restore(start);
                break;
            }

            groups.push((start, params.len()));
            params.extend(group);
        }

        let body_follows = match self.peek_token() {
            Ok(token) => starts_expression(&token.value),
            Err(_) => false,
        };
        if !body_follows && groups.len() > 1 {
            if let Some((start, count)) = groups.pop() {
                trace!(params = count, "last parameter group is the function body");
                self.tokeniser.restore(start);
                params.truncate(count);
            }
        }

        let body = self.parse_expression()?;

        Ok(Expression::Fn(FunctionLiteral {
            params,
            body: Rc::new(body),
        }))
    }

    /// `"(" id ("," id)* ")" | id`
    fn parse_vars(&mut self) -> ParseResult<Vec<Identifier>> {
        if self.peek_token()?.value != Token::LeftParen {
            return Ok(vec![self.expect_identifier()?]);
        }

        self.expect(Token::LeftParen)?;
        let mut params = vec![self.expect_identifier()?];

        loop {
            let token = self.next_token()?;
            match token.value {
                Token::Comma => params.push(self.expect_identifier()?),
                Token::RightParen => return Ok(params),
                _ => return Err(bad_token("`,` or `)`", &token)),
            }
        }
    }

    /// `"if" expr "then" expr "else" expr`
    fn parse_if(&mut self) -> ParseResult<Expression> {
        self.expect(Token::If)?;
        let condition = self.parse_expression()?;
        self.expect(Token::Then)?;
        let then_branch = self.parse_expression()?;
        self.expect(Token::Else)?;
        let else_branch = self.parse_expression()?;

        Ok(Expression::IfCond(Box::new(IfExpression {
            condition,
            then_branch,
            else_branch,
        })))
    }

    /// `app (binop app)*`, folded to the left
    fn parse_infix(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.parse_app()?;

        while let Some((operator, rhs)) = self.attempt(|p| {
            let operator = p.expect_operator()?;
            let rhs = p.parse_app()?;
            Ok((operator, rhs))
        })? {
            lhs = Expression::Binop(Box::new(BinopExpression { operator, lhs, rhs }));
        }

        Ok(lhs)
    }

    /// `term term*`: juxtaposition is application, folded to the left so `f a b` is `(f a) b`
    fn parse_app(&mut self) -> ParseResult<Expression> {
        let mut callee = self.parse_term()?;

        while let Some(argument) = self.attempt(Self::parse_term)? {
            callee = Expression::App(Box::new(AppExpression { callee, argument }));
        }

        Ok(callee)
    }

    /// `"(" expr ")" | "{" statements "}" | number | identifier`
    fn parse_term(&mut self) -> ParseResult<Expression> {
        let token = self.next_token()?;

        match token.value {
            Token::LeftParen => {
                let expression = self.parse_expression()?;
                self.expect(Token::RightParen)?;
                Ok(expression)
            }
            Token::LeftBrace => {
                let statements = self.parse_statements()?;
                self.expect(Token::RightBrace)?;
                Ok(Expression::StatementExpr(BlockExpression { statements }))
            }
            Token::Number(digits) => parse_number(digits, token.span).map(Expression::Number),
            Token::Identifier(name) => Ok(Expression::Identifier(Identifier::from(name))),
            _ => Err(bad_token("an expression", &token)),
        }
    }

    fn next_token(&mut self) -> ParseResult<WithSpan<Token<'a>>> {
        self.tokeniser.next_token()
    }

    /// Look at the next token without consuming it.
    fn peek_token(&mut self) -> ParseResult<WithSpan<Token<'a>>> {
        let saved = self.tokeniser.position();
        let token = self.tokeniser.next_token();
        self.tokeniser.restore(saved);
        token
    }

    fn expect(&mut self, expected: Token<'static>) -> ParseResult<Span> {
        let token = self.next_token()?;

        if token.value == expected {
            Ok(token.span)
        } else {
            Err(bad_token(&format!("`{}`", expected), &token))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.next_token()?;

        match token.value {
            Token::Identifier(name) => Ok(Identifier::from(name)),
            _ => Err(bad_token("identifier", &token)),
        }
    }

    fn expect_operator(&mut self) -> ParseResult<BinaryOperator> {
        let token = self.next_token()?;

        BinaryOperator::from_token(&token.value).ok_or_else(|| bad_token("operator", &token))
    }
}

fn parse_number(digits: &str, span: Span) -> ParseResult<u32> {
    digits.parse().map_err(|_| ParseError::NumberOverflow {
        digits: digits.to_owned(),
        span,
    })
}

/// Tokens that can be the first token of an expression
fn starts_expression(token: &Token<'_>) -> bool {
    matches!(
        token,
        Token::Fn
            | Token::If
            | Token::LeftParen
            | Token::LeftBrace
            | Token::Number(_)
            | Token::Identifier(_)
    )
}

fn bad_token(expected: &str, found: &WithSpan<Token<'_>>) -> ParseError {
    ParseError::BadToken {
        expected: expected.to_owned(),
        found: found.value.to_string(),
        span: found.span,
    }
}
