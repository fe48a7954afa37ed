//! # infixa
//!
//! infixa compiles infix mathematical expressions once and evaluates them many
//! times under changing variable bindings. The engine is generic over the
//! numeric type; operators, functions and literal syntax are registered by the
//! embedder. A complex-number configuration is included.
//!
//! ```
//! use infixa::complex::{Value, new_parser};
//!
//! let mut parser = new_parser().unwrap();
//! parser.compile("2 + 3 * x").unwrap();
//!
//! for (x, expected) in [(1.0, 5.0), (2.0, 8.0)] {
//!     parser.set_variable("x", Value::from(x)).unwrap();
//!     parser.evaluate().unwrap();
//!     assert_eq!(parser.result(), Some(&Value::from(expected)));
//! }
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// The complex-number configuration.
///
/// This module provides a ready-made numeric type, literal recognizer and
/// builtin set on top of the generic engine. The command line front end uses
/// it.
///
/// # Responsibilities
/// - Complex arithmetic with checked division and powers.
/// - Literal and identifier scanning.
/// - Registration of operators and functions.
pub mod complex;
/// The generic expression engine.
///
/// This module turns expression text into a folded postfix sequence and
/// evaluates that sequence against a variable table. It knows nothing about
/// the numeric type beyond what the embedder registers.
///
/// # Responsibilities
/// - Token tables with longest-prefix lookup.
/// - Tokenization, postfix conversion and constant folding.
/// - Evaluation with in-place assignment through variable slots.
pub mod engine;
/// Provides the error type for compilation and evaluation.
///
/// Every failure is an [`error::ErrorKind`] with an optional byte offset into
/// the expression text. Messages render the offset as a 1-based position.
pub mod error;
/// General utilities for safe numeric conversion and the gamma function.
pub mod util;

pub use engine::parser::{Parser, SyntaxConfig};
pub use error::{ErrorKind, EvalError, ExprError, ExprResult, ParseError};
