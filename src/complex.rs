//! The complex-number configuration of the engine.
//!
//! Values are complex numbers written with real literals and the imaginary
//! unit `i`, as in `2+3i`. Identifiers that are not functions become
//! variables on first sight and must be assigned with `=` before they are
//! used. Operators, functions and their priorities are listed on
//! [`builtin::install`].
//!
//! # Example
//! ```
//! use infixa::complex::{ComplexNumber, Value, new_parser};
//!
//! let mut parser = new_parser().unwrap();
//! parser.compile("x = 2; -x^2 + sqrt(-4)").unwrap();
//! parser.evaluate().unwrap();
//! assert_eq!(parser.result(), Some(&Value::from(ComplexNumber::new(-4.0, 2.0))));
//! assert_eq!(parser.get_variable("x"), Some(&Value::from(2.0)));
//! ```

use crate::{
    engine::parser::{Parser, SyntaxConfig},
    error::ExprResult,
};

pub mod builtin;
pub mod lexer;
pub mod number;
pub mod recognizer;
pub mod value;

pub use number::{ComplexNumber, I, ONE, ZERO};
pub use recognizer::ComplexRecognizer;
pub use value::Value;

/// A parser over complex numbers.
pub type ComplexParser = Parser<Value, ComplexRecognizer>;

/// The syntax of the complex configuration: the default braces and separator,
/// and no variable sigil.
pub const SYNTAX: SyntaxConfig = SyntaxConfig { open_brace:  '(',
                                                close_brace: ')',
                                                separator:   ',',
                                                sigil:       None, };

/// Creates a parser with every operator and function of the configuration
/// registered.
///
/// # Errors
/// Whatever [`builtin::install`] reports.
pub fn new_parser() -> ExprResult<ComplexParser> {
    let mut parser = Parser::new(SYNTAX, ComplexRecognizer);
    builtin::install(&mut parser)?;
    Ok(parser)
}
