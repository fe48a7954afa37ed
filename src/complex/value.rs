use std::fmt;

use crate::{
    complex::number::ComplexNumber,
    error::{ExprError, ExprResult},
};

/// The numeric type of the complex configuration.
///
/// Identifiers seen for the first time are stored as [`Value::Unbound`]
/// placeholders, so that compiling `x + 1` succeeds while evaluating it fails
/// until `x` is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A complex number.
    Complex(ComplexNumber),
    /// The placeholder of a variable that was never assigned, with its name.
    Unbound(String),
}

impl Value {
    /// The complex number this value holds.
    ///
    /// # Errors
    /// A domain error naming the variable if the value is a placeholder.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::{ComplexNumber, Value};
    ///
    /// assert_eq!(Value::from(2.0).complex().unwrap(), ComplexNumber::from(2.0));
    ///
    /// let err = Value::Unbound("x".into()).complex().unwrap_err();
    /// assert_eq!(err.to_string(), "The variable x is undefined");
    /// ```
    pub fn complex(&self) -> ExprResult<ComplexNumber> {
        match self {
            Self::Complex(number) => Ok(*number),
            Self::Unbound(name) => Err(ExprError::domain(format!("The variable {name} is undefined"))),
        }
    }

    /// Whether this is a placeholder.
    #[must_use]
    pub const fn is_unbound(&self) -> bool {
        matches!(self, Self::Unbound(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complex(number) => write!(f, "{number}"),
            Self::Unbound(name) => write!(f, "<undefined {name}>"),
        }
    }
}

impl From<ComplexNumber> for Value {
    fn from(number: ComplexNumber) -> Self {
        Self::Complex(number)
    }
}

impl From<f64> for Value {
    fn from(real: f64) -> Self {
        Self::Complex(ComplexNumber::from(real))
    }
}
