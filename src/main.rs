use std::process::ExitCode;

use clap::Parser;
use infixa::{
    complex::{ComplexNumber, ComplexParser, Value, new_parser},
    error::{ErrorKind, ExprError},
};
use tracing_subscriber::EnvFilter;

/// Imaginary parts below this print as real results.
const PRINT_TOLERANCE: f64 = 1e-15;

/// infixa evaluates infix expressions over complex numbers.
///
/// Each expression is compiled and evaluated on its own, but they share one
/// set of variables, so `x=2` in one expression is visible in the next.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Binds a variable before each expression, as `NAME=RE` or `NAME=RE,IM`.
    #[arg(short, long = "var", value_name = "NAME=RE[,IM]", value_parser = parse_binding)]
    vars: Vec<(String, ComplexNumber)>,

    /// Digits printed after the decimal point.
    #[arg(short, long, default_value_t = 6)]
    precision: usize,

    /// Expressions to evaluate.
    expressions: Vec<String>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    if args.expressions.is_empty() {
        eprintln!("ERROR: Missing expressions arguments!");
        return ExitCode::from(255);
    }

    let mut parser = match new_parser() {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        },
    };
    for expression in &args.expressions {
        match run(&mut parser, expression, &args.vars) {
            Ok(number) => println!("{expression} = {}", format_number(number, args.precision)),
            Err(e) => println!("Error evaluating: {e}"),
        }
    }

    ExitCode::SUCCESS
}

/// Compiles and evaluates one expression.
fn run(parser: &mut ComplexParser,
       expression: &str,
       vars: &[(String, ComplexNumber)])
       -> Result<ComplexNumber, ExprError> {
    for (name, value) in vars {
        parser.set_variable(name, Value::Complex(*value))?;
    }

    parser.compile(expression)?;
    parser.evaluate()?;

    parser.result()
          .ok_or_else(|| ExprError::new(ErrorKind::UnexpectedEndOfExpression))?
          .complex()
}

/// Prints `re`, `re+imi` or `re-imi` with `precision` decimals.
fn format_number(number: ComplexNumber, precision: usize) -> String {
    if number.is_real(PRINT_TOLERANCE) {
        format!("{:.precision$}", number.real)
    } else {
        let sign = if number.imaginary > 0.0 { '+' } else { '-' };
        format!("{:.precision$}{sign}{:.precision$}i",
                number.real,
                number.imaginary.abs())
    }
}

/// Parses `NAME=RE` or `NAME=RE,IM`.
fn parse_binding(binding: &str) -> Result<(String, ComplexNumber), String> {
    let (name, value) = binding.split_once('=')
                               .ok_or_else(|| format!("expected NAME=VALUE, found '{binding}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("the variable name is empty".to_string());
    }

    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{part}': {e}"))
    };
    let number = match value.split_once(',') {
        Some((real, imaginary)) => ComplexNumber::new(parse(real)?, parse(imaginary)?),
        None => ComplexNumber::from(parse(value)?),
    };

    Ok((name.to_string(), number))
}
