use std::rc::Rc;

use tracing::debug;

use crate::{
    environment::Environment,
    error::{EvalError, EvalResult},
    value::{Closure, Value},
};

use tiny_parser::ast::{
    BinaryOperator, BinopExpression, Expression, Identifier, IfExpression, Program, Statement,
};

/// Tree-walking evaluator around a single current environment.
///
/// Function application swaps the current environment for the closure's own while the body
/// runs and always puts the caller's back afterwards, including when the body fails.
pub struct Evaluator {
    env: Environment,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_environment(Environment::new())
    }

    pub fn with_environment(env: Environment) -> Self {
        Evaluator { env }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn set_environment(&mut self, env: Environment) {
        self.env = env;
    }

    pub fn into_environment(self) -> Environment {
        self.env
    }

    /// Evaluate every statement in order, returning the value of the last one.
    ///
    /// Stops at the first failing statement; bindings made by the statements before it are kept.
    pub fn eval_program(&mut self, prog: &Program) -> EvalResult<Option<Value>> {
        let mut result = None;

        for stmt in &prog.statements {
            result = self.eval(stmt)?;
        }

        Ok(result)
    }

    /// Evaluate one top-level statement.
    ///
    /// If it fails, the environment is left exactly as it was before the statement started.
    pub fn eval(&mut self, stmt: &Statement) -> EvalResult<Option<Value>> {
        let before = self.env.clone();

        let result = self.eval_statement(stmt);
        if result.is_err() {
            self.env = before;
        }

        result
    }

    fn eval_statement(&mut self, stmt: &Statement) -> EvalResult<Option<Value>> {
        match stmt {
            Statement::Expression(expression) => self.eval_expression(expression),
            Statement::Assignment { name, body } => {
                // Evaluated before anything is bound, so a failing body binds nothing
                let value = self.eval_value(body)?;

                debug!(name = %name, value = %value, "bind");
                self.env.define(name.clone(), value.clone());

                Ok(Some(value))
            }
        }
    }

    /// Blocks share the surrounding environment: a `let` inside one stays visible after it.
    fn eval_statements(&mut self, statements: &[Statement]) -> EvalResult<Option<Value>> {
        let mut result = None;

        for stmt in statements {
            result = self.eval_statement(stmt)?;
        }

        Ok(result)
    }

    fn eval_expression(&mut self, expr: &Expression) -> EvalResult<Option<Value>> {
        match expr {
            Expression::Number(value) => Ok(Some(Value::Number(*value))),
            Expression::Identifier(identifier) => match self.env.get(&identifier.name) {
                Some(value) => Ok(Some(value.clone())),
                None => Err(EvalError::UnknownVariable(identifier.clone())),
            },

            Expression::Fn(func) => Ok(Some(Value::Closure(Rc::new(Closure {
                params: func.params.clone(),
                body: Rc::clone(&func.body),
                env: self.env.clone(),
            })))),
            Expression::App(app) => {
                let closure = match self.eval_value(&app.callee)? {
                    Value::Closure(closure) => closure,
                    value => return Err(EvalError::NotAFunction(value)),
                };
                let argument = self.eval_value(&app.argument)?;

                self.apply_function(&closure, argument)
            }

            Expression::Binop(binop) => self.eval_binop_expression(binop).map(Some),
            Expression::IfCond(if_expr) => self.eval_if_expression(if_expr),
            Expression::StatementExpr(block) => self.eval_statements(&block.statements),
        }
    }

    /// Evaluate an expression in a position where a value is required.
    fn eval_value(&mut self, expr: &Expression) -> EvalResult<Value> {
        self.eval_expression(expr)?.ok_or(EvalError::NoValue)
    }

    fn eval_number(&mut self, expr: &Expression, operator: BinaryOperator) -> EvalResult<u32> {
        match self.eval_value(expr)? {
            Value::Number(value) => Ok(value),
            value => Err(EvalError::NotANumber { operator, value }),
        }
    }

    fn eval_binop_expression(&mut self, binop: &BinopExpression) -> EvalResult<Value> {
        let left = self.eval_number(&binop.lhs, binop.operator)?;
        let right = self.eval_number(&binop.rhs, binop.operator)?;

        let result = match binop.operator {
            BinaryOperator::LessThan => u32::from(left < right),
            BinaryOperator::EqualEqual => u32::from(left == right),
            BinaryOperator::GreaterThan => u32::from(left > right),
            BinaryOperator::Plus => left.wrapping_add(right),
            BinaryOperator::Minus => left.wrapping_sub(right),
        };

        Ok(Value::Number(result))
    }

    fn eval_if_expression(&mut self, if_expr: &IfExpression) -> EvalResult<Option<Value>> {
        // Only the branch that is taken gets evaluated
        if self.eval_value(&if_expr.condition)?.is_truthy() {
            self.eval_expression(&if_expr.then_branch)
        } else {
            self.eval_expression(&if_expr.else_branch)
        }
    }

    /// Apply a closure to one argument.
    ///
    /// Binding the last parameter runs the body; any earlier one returns a closure over the rest.
    #[tracing::instrument(level = "trace", skip_all, fields(params = closure.params.len()))]
    fn apply_function(&mut self, closure: &Closure, argument: Value) -> EvalResult<Option<Value>> {
        let mut inner_env = closure.env.clone();

        let rest: &[Identifier] = match closure.params.split_first() {
            Some((param, rest)) => {
                inner_env.define(param.clone(), argument);
                rest
            }
            None => &[],
        };

        if !rest.is_empty() {
            return Ok(Some(Value::Closure(Rc::new(Closure {
                params: rest.to_vec(),
                body: Rc::clone(&closure.body),
                env: inner_env,
            }))));
        }

        // Remember the caller's environment (when exiting from the call)
        let outer_env = std::mem::replace(&mut self.env, inner_env);

        let result = self.eval_expression(&closure.body);

        self.env = outer_env;

        result
    }
}
