use crate::token::Token;
use std::{borrow::Borrow, fmt, fmt::Display, rc::Rc};

/// The top-level statements of one parsed input.
///
/// Formats as the canonical source text of every statement, separated by ` ; `.
#[derive(Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_separated(f, &self.statements, " ; ")
    }
}

#[derive(Debug, PartialEq)]
pub enum Statement {
    /// `let name = body`
    Assignment {
        /// The name/identifier of the variable
        name: Identifier,
        /// The value being bound
        body: Expression,
    },
    Expression(Expression),
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assignment { name, body } => {
                write!(f, "{} {} {} {}", Token::Let, name, Token::Equal, body)
            }
            Statement::Expression(expression) => write!(f, "{}", expression),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    // Literal
    Identifier(Identifier),
    Number(u32),

    // Complex
    Fn(FunctionLiteral),
    App(Box<AppExpression>),
    Binop(Box<BinopExpression>),
    IfCond(Box<IfExpression>),
    StatementExpr(BlockExpression),
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Number(value) => write!(f, "{}", value),

            Expression::Fn(func) => write!(f, "{}", func),
            Expression::App(app) => write!(f, "{}", app),
            Expression::Binop(binop) => write!(f, "{}", binop),
            Expression::IfCond(if_cond) => write!(f, "{}", if_cond),
            Expression::StatementExpr(block) => write!(f, "{}", block),
        }
    }
}

/// A variable name. Ordered by name so it can key an environment.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Identifier {
    pub name: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self { name }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    LessThan,
    EqualEqual,
    GreaterThan,
    Plus,
    Minus,
}

impl BinaryOperator {
    pub fn from_token(token: &Token<'_>) -> Option<BinaryOperator> {
        match token {
            Token::LessThan => Some(BinaryOperator::LessThan),
            Token::EqualEqual => Some(BinaryOperator::EqualEqual),
            Token::GreaterThan => Some(BinaryOperator::GreaterThan),
            Token::Plus => Some(BinaryOperator::Plus),
            Token::Minus => Some(BinaryOperator::Minus),
            _ => None,
        }
    }

    pub fn token(self) -> Token<'static> {
        match self {
            BinaryOperator::LessThan => Token::LessThan,
            BinaryOperator::EqualEqual => Token::EqualEqual,
            BinaryOperator::GreaterThan => Token::GreaterThan,
            BinaryOperator::Plus => Token::Plus,
            BinaryOperator::Minus => Token::Minus,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[derive(Debug, PartialEq)]
pub struct FunctionLiteral {
    /// Parameter identifiers, never empty
    pub params: Vec<Identifier>,
    /// Shared with every closure created from this literal, so it outlives the parsed program
    pub body: Rc<Expression>,
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_function(f, &self.params, &self.body)
    }
}

/// Write a function as `fn x body` or `fn ( x , y ) body`.
///
/// Closures reuse this so a partially applied function prints its remaining parameters.
pub fn write_function(
    f: &mut fmt::Formatter<'_>,
    params: &[Identifier],
    body: &Expression,
) -> fmt::Result {
    write!(f, "{} ", Token::Fn)?;

    match params {
        [single] => write!(f, "{}", single)?,
        params => {
            write!(f, "{} ", Token::LeftParen)?;
            write_separated(f, params, " , ")?;
            write!(f, " {}", Token::RightParen)?;
        }
    }

    write!(f, " {}", body)
}

fn write_separated<T: Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
pub struct AppExpression {
    pub callee: Expression,
    pub argument: Expression,
}

impl Display for AppExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "( {} ) ( {} )", self.callee, self.argument)
    }
}

#[derive(Debug, PartialEq)]
pub struct BinopExpression {
    pub operator: BinaryOperator,
    pub lhs: Expression,
    pub rhs: Expression,
}

impl Display for BinopExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "( {l} ) {op} ( {r} )",
            l = self.lhs,
            op = self.operator,
            r = self.rhs
        )
    }
}

#[derive(Debug, PartialEq)]
pub struct IfExpression {
    pub condition: Expression,
    pub then_branch: Expression,
    pub else_branch: Expression,
}

impl Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ( {} ) {} ( {} ) {} ( {} )",
            Token::If,
            self.condition,
            Token::Then,
            self.then_branch,
            Token::Else,
            self.else_branch
        )
    }
}

/// A `{ }` block. Does not open a new scope.
#[derive(Debug, PartialEq)]
pub struct BlockExpression {
    pub statements: Vec<Statement>,
}

impl Display for BlockExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ ")?;
        write_separated(f, &self.statements, " ; ")?;
        write!(f, " }}")
    }
}
