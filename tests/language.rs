use std::fs;

use infixa::{
    ErrorKind, ExprError,
    complex::{ComplexNumber, Value, new_parser},
};
use walkdir::WalkDir;

const TOLERANCE: f64 = 1e-9;

/// Compiles and evaluates `src` on a fresh complex parser.
fn eval(src: &str) -> Result<ComplexNumber, ExprError> {
    let mut parser = new_parser().unwrap();
    parser.compile(src)?;
    parser.evaluate()?;
    parser.result()
          .ok_or_else(|| ExprError::new(ErrorKind::UnexpectedEndOfExpression))?
          .complex()
}

fn close_to(actual: ComplexNumber, expected: ComplexNumber) -> bool {
    (actual.real - expected.real).abs() < TOLERANCE
    && (actual.imaginary - expected.imaginary).abs() < TOLERANCE
}

fn parse_expected(expected: &str) -> ComplexNumber {
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .unwrap_or_else(|e| panic!("Bad expected value {part:?}: {e}"))
    };
    match expected.split_once(',') {
        Some((real, imaginary)) => ComplexNumber::new(parse(real), parse(imaginary)),
        None => ComplexNumber::from(parse(expected)),
    }
}

#[test]
fn corpus_cases_hold() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (src, expected) = line.rsplit_once(" => ")
                                      .unwrap_or_else(|| panic!("{path:?}:{}: missing ' => '", i + 1));
            count += 1;

            match (eval(src), expected.strip_prefix("error ")) {
                (Ok(value), None) => {
                    let expected = parse_expected(expected);
                    assert!(close_to(value, expected),
                            "{path:?}:{}: {src} gave {value}, expected {expected}",
                            i + 1);
                },
                (Err(e), Some(message)) => {
                    assert_eq!(e.to_string(), message, "{path:?}:{}: {src}", i + 1);
                },
                (Ok(value), Some(message)) => {
                    panic!("{path:?}:{}: {src} gave {value}, expected error {message:?}", i + 1)
                },
                (Err(e), None) => panic!("{path:?}:{}: {src} failed: {e}", i + 1),
            }
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(eval("2+3*4").unwrap(), ComplexNumber::from(14.0));
    assert_eq!(eval("(2+3)*4").unwrap(), ComplexNumber::from(20.0));
}

#[test]
fn power_is_right_associative() {
    assert_eq!(eval("2^3^2").unwrap(), ComplexNumber::from(512.0));
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(eval("2-3-4").unwrap(), ComplexNumber::from(-5.0));
}

#[test]
fn double_negation_cancels() {
    assert_eq!(eval("--5").unwrap(), ComplexNumber::from(5.0));
}

#[test]
fn wrong_argument_counts() {
    let err = eval("sin()").unwrap_err();
    assert_eq!(err.kind(),
               &ErrorKind::WrongArgumentCount { expected: 1,
                                                actual:   0, });

    let err = eval("sin(1,2)").unwrap_err();
    assert_eq!(err.kind(),
               &ErrorKind::WrongArgumentCount { expected: 1,
                                                actual:   2, });
}

#[test]
fn assignment_writes_the_variable() {
    let mut parser = new_parser().unwrap();
    parser.compile("x=5").unwrap();
    parser.evaluate().unwrap();

    assert_eq!(parser.get_variable("x"), Some(&Value::from(5.0)));
    assert_eq!(parser.result(), Some(&Value::from(5.0)));
}

#[test]
fn assignment_to_a_number_fails() {
    let err = eval("5=x").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CannotAssignToNonVariable);
}

#[test]
fn assignment_to_a_negated_variable_fails() {
    let mut parser = new_parser().unwrap();
    parser.set_variable("x", Value::from(1.0)).unwrap();
    parser.compile("-x = 2").unwrap();

    let err = parser.evaluate().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CannotAssignToNonVariable);
    assert_eq!(parser.get_variable("x"), Some(&Value::from(1.0)));
}

#[test]
fn bracket_mismatch_offsets() {
    let err = eval("(1+2").unwrap_err();
    assert_eq!((err.kind(), err.offset()), (&ErrorKind::BracketMismatch, Some(3)));

    let err = eval("1+2)").unwrap_err();
    assert_eq!((err.kind(), err.offset()), (&ErrorKind::BracketMismatch, Some(3)));
}

#[test]
fn evaluate_is_idempotent() {
    let mut parser = new_parser().unwrap();
    parser.set_variable("x", Value::from(3.0)).unwrap();
    parser.compile("x^2 - 2x + sin(pi()/2)").unwrap();

    parser.evaluate().unwrap();
    let first = parser.result().cloned();
    for _ in 0..5 {
        parser.evaluate().unwrap();
        assert_eq!(parser.result().cloned(), first);
    }
    assert_eq!(first, Some(Value::from(4.0)));
}

#[test]
fn compiled_expression_follows_variables() {
    let mut parser = new_parser().unwrap();
    parser.compile("x * x + 1").unwrap();

    for x in 0..10 {
        let x = f64::from(x);
        parser.set_variable("x", Value::from(x)).unwrap();
        parser.evaluate().unwrap();
        assert_eq!(parser.result(), Some(&Value::from(x * x + 1.0)));
    }
}

#[test]
fn constants_fold_at_compile_time() {
    let mut parser = new_parser().unwrap();
    parser.compile("(2 + 3) * sin(0) + cos(0)").unwrap();
    assert_eq!(parser.compiled().len(), 1);

    parser.compile("2 * 3 + x").unwrap();
    assert_eq!(parser.compiled().len(), 3);
}

#[test]
fn discovered_variables_start_unbound() {
    let mut parser = new_parser().unwrap();
    parser.compile("speed * 2").unwrap();

    assert_eq!(parser.get_variable("speed"), Some(&Value::Unbound("speed".into())));
    assert!(parser.get_variable("speed").is_some_and(Value::is_unbound));
    assert!(parser.evaluate().is_err());

    parser.set_variable("speed", Value::from(4.0)).unwrap();
    parser.evaluate().unwrap();
    assert!(!parser.get_variable("speed").is_some_and(Value::is_unbound));
    assert_eq!(parser.result(), Some(&Value::from(8.0)));
}

#[test]
fn failed_evaluate_keeps_previous_result() {
    let mut parser = new_parser().unwrap();
    parser.compile("10 / x").unwrap();
    parser.set_variable("x", Value::from(2.0)).unwrap();
    parser.evaluate().unwrap();

    parser.set_variable("x", Value::from(0.0)).unwrap();
    let err = parser.evaluate().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DivisionByZero);
    assert_eq!(parser.result(), Some(&Value::from(5.0)));
}

#[test]
fn failed_compile_leaves_nothing_compiled() {
    let mut parser = new_parser().unwrap();
    parser.compile("1 + 1").unwrap();
    parser.evaluate().unwrap();

    assert!(parser.compile("1 + (").is_err());
    assert!(parser.compiled().is_empty());
    assert_eq!(parser.evaluate().unwrap_err().kind(), &ErrorKind::NoSuchToken);
    assert_eq!(parser.result(), Some(&Value::from(2.0)));
}

#[test]
fn fresh_parser_has_nothing_to_evaluate() {
    let mut parser = new_parser().unwrap();
    assert_eq!(parser.evaluate().unwrap_err().kind(), &ErrorKind::NoSuchToken);
    assert_eq!(parser.result(), None);
}

#[test]
fn operators_without_operands_do_not_compile() {
    let mut parser = new_parser().unwrap();

    for (src, offset) in [("-", 0), ("~", 0), ("--", 1), (" + ", 2), ("2 * -", 4)] {
        let err = parser.compile(src).unwrap_err();
        assert_eq!((err.kind(), err.offset()),
                   (&ErrorKind::UnexpectedEndOfExpression, Some(offset)),
                   "{src:?}");
        assert!(parser.evaluate().is_err(), "{src:?}");
    }
}

#[test]
fn empty_expression_has_no_result() {
    let mut parser = new_parser().unwrap();
    parser.compile("3").unwrap();
    parser.evaluate().unwrap();

    parser.compile("   ").unwrap();
    assert!(parser.compiled().is_empty());
    parser.evaluate().unwrap();
    assert_eq!(parser.result(), None);
}

#[test]
fn parser_reports_its_text_and_syntax() {
    let mut parser = new_parser().unwrap();
    assert_eq!(parser.config(), &infixa::complex::SYNTAX);

    parser.compile("2x + 1").unwrap();
    assert_eq!(parser.expression(), "2x + 1");

    assert!(parser.compile("2x +").is_err());
    assert_eq!(parser.expression(), "2x +");
}

#[test]
fn variables_persist_between_compiles() {
    let mut parser = new_parser().unwrap();
    parser.compile("r = 2").unwrap();
    parser.evaluate().unwrap();

    parser.compile("pi() r^2").unwrap();
    parser.evaluate().unwrap();
    let area = parser.result().unwrap().complex().unwrap();
    assert!((area.real - 4.0 * std::f64::consts::PI).abs() < TOLERANCE);
}

#[test]
fn integer_ids_alias_decimal_names() {
    let mut parser = new_parser().unwrap();
    parser.set_variable(7_usize, Value::from(2.0)).unwrap();
    assert_eq!(parser.get_variable("7"), Some(&Value::from(2.0)));
    assert!(parser.remove_variable(7_usize));
    assert!(parser.get_variable("7").is_none());
}
