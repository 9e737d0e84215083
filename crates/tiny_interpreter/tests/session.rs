use pretty_assertions::assert_eq;

use tiny_interpreter::{EvalError, Evaluator, Value};
use tiny_parser::{ast::Identifier, parse, ParseError};

/// One REPL turn: parse the line, evaluate it, and format whatever came out.
fn turn(evaluator: &mut Evaluator, line: &str) -> Result<Option<String>, String> {
    let program = parse(line).map_err(|error| format!("parse: {}", error))?;
    let value = evaluator
        .eval_program(&program)
        .map_err(|error| format!("eval: {}", error))?;

    Ok(value.map(|value| value.to_string()))
}

#[test]
fn closures_outlive_the_line_that_defined_them() {
    let mut evaluator = Evaluator::new();

    assert_eq!(
        turn(&mut evaluator, "let add = fn ( x , y ) x + y"),
        Ok(Some("fn ( x , y ) ( x ) + ( y )".to_string()))
    );
    assert_eq!(
        turn(&mut evaluator, "let inc = add 1"),
        Ok(Some("fn y ( x ) + ( y )".to_string()))
    );
    assert_eq!(turn(&mut evaluator, "inc 41"), Ok(Some("42".to_string())));
}

#[test]
fn bindings_persist_across_turns() {
    let mut evaluator = Evaluator::new();

    turn(&mut evaluator, "let x = 1").unwrap();
    turn(&mut evaluator, "let f = fn y { x + y }").unwrap();
    turn(&mut evaluator, "let x = 100").unwrap();

    assert_eq!(turn(&mut evaluator, "f 1"), Ok(Some("2".to_string())));
    assert_eq!(turn(&mut evaluator, "x"), Ok(Some("100".to_string())));
}

#[test]
fn failed_turn_keeps_previous_bindings() {
    let mut evaluator = Evaluator::new();

    turn(&mut evaluator, "let a = 1 ; let b = fn x x").unwrap();

    assert_eq!(
        turn(&mut evaluator, "let c = nope"),
        Err("eval: identifier 'nope' not found".to_string())
    );
    assert_eq!(
        turn(&mut evaluator, "} unparsed"),
        Err("parse: could not parse `} unparsed`".to_string())
    );

    assert_eq!(evaluator.environment().len(), 2);
    assert_eq!(turn(&mut evaluator, "b a"), Ok(Some("1".to_string())));
}

#[test]
fn empty_line_has_no_value() {
    let mut evaluator = Evaluator::new();

    assert_eq!(parse(""), Ok(Default::default()));
    assert_eq!(turn(&mut evaluator, ""), Ok(None));
    assert_eq!(turn(&mut evaluator, "{ }"), Ok(None));
}

#[test]
fn environment_can_be_moved_between_evaluators() {
    let mut first = Evaluator::new();
    turn(&mut first, "let double = fn n n + n").unwrap();

    let mut second = Evaluator::with_environment(first.into_environment());
    assert_eq!(turn(&mut second, "double 21"), Ok(Some("42".to_string())));
}

#[test]
fn statement_by_statement() {
    let program = parse("let x = 2 ; x + oops ; let y = 3").unwrap();
    let mut evaluator = Evaluator::new();

    assert_eq!(
        evaluator.eval(&program.statements[0]),
        Ok(Some(Value::Number(2)))
    );
    assert_eq!(
        evaluator.eval(&program.statements[1]),
        Err(EvalError::UnknownVariable(Identifier::from("oops")))
    );
    assert_eq!(
        evaluator.eval(&program.statements[2]),
        Ok(Some(Value::Number(3)))
    );
    assert!(evaluator.environment().contains("x"));
    assert!(evaluator.environment().contains("y"));
}

#[test]
fn parse_errors_are_reported() {
    assert_eq!(parse("let x ="), Err(ParseError::EndOfInput));
    assert!(matches!(parse("99999999999"), Err(ParseError::NumberOverflow { .. })));
}
