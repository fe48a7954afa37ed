use std::f64::consts::{E, FRAC_PI_2, PI};

use crate::{
    complex::{
        ComplexParser,
        number::{ComplexNumber, ONE, ZERO},
        value::Value,
    },
    engine::registry::{Arity, Associativity, Fixity, Operand, Variables},
    error::{ErrorKind, ExprError, ExprResult},
    util::num::factorial,
};

/// Imaginary parts below this are treated as zero by the factorial.
pub const REAL_TOLERANCE: f64 = 1e-11;

type Builtin = fn(&[Value]) -> ExprResult<Value>;

/// Returns the single argument of a one-argument function.
fn single(args: &[Value]) -> ExprResult<ComplexNumber> {
    match args {
        [arg] => arg.complex(),
        _ => Err(ExprError::new(ErrorKind::WrongArgumentCount { expected: 1,
                                                                 actual:   args.len(), })),
    }
}

/// Generates a one-argument builtin that maps a complex number through a
/// `ComplexNumber` method.
///
/// # Example
/// ```
/// use infixa::complex::{Value, builtin::sin};
///
/// let one = sin(&[Value::from(std::f64::consts::FRAC_PI_2)]).unwrap();
/// assert!((one.complex().unwrap().real - 1.0).abs() < 1e-12);
/// ```
macro_rules! complex_builtin {
    ($fname:ident, $complex_fn:ident) => {
        pub fn $fname(args: &[Value]) -> ExprResult<Value> {
            Ok(Value::Complex(single(args)?.$complex_fn()))
        }
    };
}

complex_builtin!(sin, sin);
complex_builtin!(cos, cos);
complex_builtin!(tg, tan);
complex_builtin!(arcsin, asin);
complex_builtin!(arccos, acos);
complex_builtin!(arctg, atan);
complex_builtin!(exp, exp);
complex_builtin!(sqrt, sqrt);
complex_builtin!(cbrt, cbrt);
complex_builtin!(sinh, sinh);
complex_builtin!(cosh, cosh);
complex_builtin!(th, tanh);

/// Cotangent, `1 / tan(z)`.
///
/// # Errors
/// [`ErrorKind::DivisionByZero`] where the tangent vanishes exactly.
pub fn ctg(args: &[Value]) -> ExprResult<Value> {
    ONE.checked_div(single(args)?.tan()).map(Value::Complex)
}

/// Arccotangent, `atan(1 / z)`, with `arcctg(0) = π/2`.
pub fn arcctg(args: &[Value]) -> ExprResult<Value> {
    let z = single(args)?;
    if z == ZERO {
        return Ok(Value::from(FRAC_PI_2));
    }
    Ok(Value::Complex(z.recip().atan()))
}

/// Natural logarithm, principal branch.
///
/// # Errors
/// A domain error for zero.
///
/// # Example
/// ```
/// use infixa::complex::{Value, builtin::ln};
///
/// let one = ln(&[Value::from(std::f64::consts::E)]).unwrap();
/// assert!((one.complex().unwrap().real - 1.0).abs() < 1e-12);
/// assert!(ln(&[Value::from(0.0)]).is_err());
/// ```
pub fn ln(args: &[Value]) -> ExprResult<Value> {
    let z = single(args)?;
    if z == ZERO {
        return Err(ExprError::domain("Logarithm of zero"));
    }
    Ok(Value::Complex(z.ln()))
}

/// The constant π.
pub fn pi(_: &[Value]) -> ExprResult<Value> {
    Ok(Value::from(PI))
}

/// The constant e.
pub fn e(_: &[Value]) -> ExprResult<Value> {
    Ok(Value::from(E))
}

/// Sum of any number of arguments; `sum()` is zero.
///
/// # Example
/// ```
/// use infixa::complex::{Value, builtin::sum};
///
/// assert_eq!(sum(&[]).unwrap(), Value::from(0.0));
/// assert_eq!(sum(&[Value::from(1.0), Value::from(2.5)]).unwrap(), Value::from(3.5));
/// ```
pub fn sum(args: &[Value]) -> ExprResult<Value> {
    args.iter()
        .try_fold(ZERO, |acc, arg| Ok(acc + arg.complex()?))
        .map(Value::Complex)
}

/// Product of any number of arguments; `product()` is one.
pub fn product(args: &[Value]) -> ExprResult<Value> {
    args.iter()
        .try_fold(ONE, |acc, arg| Ok(acc * arg.complex()?))
        .map(Value::Complex)
}

/// Every one-argument function of the configuration.
pub const UNARY_FUNCTIONS: &[(&str, Builtin)] = &[("sin", sin),
                                                   ("cos", cos),
                                                   ("tg", tg),
                                                   ("ctg", ctg),
                                                   ("arcsin", arcsin),
                                                   ("arccos", arccos),
                                                   ("arctg", arctg),
                                                   ("arcctg", arcctg),
                                                   ("exp", exp),
                                                   ("sqrt", sqrt),
                                                   ("cbrt", cbrt),
                                                   ("ln", ln),
                                                   ("sinh", sinh),
                                                   ("cosh", cosh),
                                                   ("th", th)];

/// Lifts a complex operation into a binary operator that rejects
/// placeholders on either side.
fn arithmetic(op: fn(ComplexNumber, ComplexNumber) -> ExprResult<ComplexNumber>)
              -> impl Fn(Operand<Value>, Operand<Value>, &mut Variables<Value>) -> ExprResult<Value> {
    move |a: Operand<Value>, b: Operand<Value>, _: &mut Variables<Value>| {
        op(a.value().complex()?, b.value().complex()?).map(Value::Complex)
    }
}

/// Lifts a complex operation into a unary operator.
fn unary(op: fn(ComplexNumber) -> ExprResult<ComplexNumber>) -> impl Fn(Value) -> ExprResult<Value> {
    move |value: Value| op(value.complex()?).map(Value::Complex)
}

/// `a = b`: stores `b` into the variable `a` and yields it.
fn assign(a: Operand<Value>, b: Operand<Value>, variables: &mut Variables<Value>) -> ExprResult<Value> {
    let name = a.slot_name()
                .ok_or_else(|| ExprError::new(ErrorKind::CannotAssignToNonVariable))?;
    let value = Value::Complex(b.value().complex()?);
    variables.insert(name, value.clone());
    Ok(value)
}

/// `a ; b`: yields `b` once both sides are defined.
fn sequence(a: Operand<Value>, b: Operand<Value>, _: &mut Variables<Value>) -> ExprResult<Value> {
    a.value().complex()?;
    Ok(Value::Complex(b.value().complex()?))
}

/// `x!`, defined for real arguments only.
fn factorial_of(z: ComplexNumber) -> ExprResult<ComplexNumber> {
    if !z.is_real(REAL_TOLERANCE) {
        return Err(ExprError::domain("Factorial takes only real numbers"));
    }
    factorial(z.real).map(ComplexNumber::from)
}

/// Registers the operators and functions of the complex configuration.
///
/// | Operator | Kind           | Priority | Associativity |
/// |----------|----------------|----------|---------------|
/// | `^`      | binary         | 4        | right         |
/// | `*` `/`  | binary         | 5        | left          |
/// | adjacency| binary (`*`)   | 5        | left          |
/// | `+` `-`  | binary         | 10       | left          |
/// | `=`      | binary         | 20       | right         |
/// | `;`      | binary         | 40       | right         |
/// | `+` `-`  | prefix         | 10       |               |
/// | `~`      | prefix         | 1        |               |
/// | `!`      | postfix        | 1        |               |
pub fn install(parser: &mut ComplexParser) -> ExprResult<()> {
    parser.add_operator("+", 10, Associativity::Left, arithmetic(|a, b| Ok(a + b)));
    parser.add_operator("-", 10, Associativity::Left, arithmetic(|a, b| Ok(a - b)));
    parser.add_operator("*", 5, Associativity::Left, arithmetic(|a, b| Ok(a * b)));
    parser.add_operator("", 5, Associativity::Left, arithmetic(|a, b| Ok(a * b)));
    parser.add_operator("/", 5, Associativity::Left, arithmetic(ComplexNumber::checked_div));
    parser.add_operator("^", 4, Associativity::Right, arithmetic(ComplexNumber::checked_pow));
    parser.add_operator(";", 40, Associativity::Right, sequence);
    parser.add_operator("=", 20, Associativity::Right, assign);

    parser.add_unary_operator("+", Fixity::Prefix, 10, unary(Ok))?;
    parser.add_unary_operator("-", Fixity::Prefix, 10, unary(|z| Ok(-z)))?;
    parser.add_unary_operator("~", Fixity::Prefix, 1, unary(|z| Ok(z.conj())))?;
    parser.add_unary_operator("!", Fixity::Postfix, 1, unary(factorial_of))?;

    for &(name, function) in UNARY_FUNCTIONS {
        parser.add_function(name, Arity::Fixed(1), function)?;
    }
    parser.add_function("pi", Arity::Fixed(0), pi)?;
    parser.add_function("e", Arity::Fixed(0), e)?;
    parser.add_function("sum", Arity::Unbounded, sum)?;
    parser.add_function("product", Arity::Unbounded, product)?;

    Ok(())
}
