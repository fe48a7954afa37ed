use std::process::{Command, Output};

fn infixa(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_infixa")).args(args)
                                              .env_remove("RUST_LOG")
                                              .output()
                                              .unwrap_or_else(|e| panic!("Failed to run infixa: {e}"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn missing_expressions_exit_255() {
    let output = infixa(&[]);

    assert_eq!(output.status.code(), Some(255));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing expressions arguments"));
    assert!(output.stdout.is_empty());
}

#[test]
fn prints_real_and_complex_results() {
    let output = infixa(&["2+3*4", "sqrt(-4) + 1", "1 - 2i"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output),
               "2+3*4 = 14.000000\nsqrt(-4) + 1 = 1.000000+2.000000i\n1 - 2i = 1.000000-2.000000i\n");
}

#[test]
fn errors_do_not_stop_later_expressions() {
    let output = infixa(&["sin()", "1/0", "y", "2^10"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output),
               "Error evaluating: Function requires 1 arguments but 0 given at position 5\n\
                Error evaluating: Division by zero at position 2\n\
                Error evaluating: The variable y is undefined\n\
                2^10 = 1024.000000\n");
}

#[test]
fn variables_carry_over_between_expressions() {
    let output = infixa(&["x = 4", "x^2"]);
    assert_eq!(stdout(&output), "x = 4 = 4.000000\nx^2 = 16.000000\n");
}

#[test]
fn bindings_and_precision() {
    let output = infixa(&["--var", "r=2", "--var", "z=0,1", "-p", "2", "r z", "pi() r^2"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "r z = 0.00+2.00i\npi() r^2 = 12.57\n");
}

#[test]
fn malformed_binding_is_rejected() {
    let output = infixa(&["--var", "r", "1"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("NAME=VALUE"));
}

#[test]
fn empty_expression_is_reported() {
    let output = infixa(&["  "]);
    assert_eq!(stdout(&output), "Error evaluating: Unexpected end of expression\n");
}

#[test]
fn operator_without_operand_is_reported() {
    let output = infixa(&["-", "2"]);
    assert_eq!(stdout(&output),
               "Error evaluating: Unexpected end of expression at position 1\n2 = 2.000000\n");
}
