/// Error kinds.
///
/// Declares every failure the engine or a numeric configuration can report,
/// independent of where in the source text it happened.
pub mod kind;
/// Position-carrying errors.
///
/// Wraps an [`ErrorKind`] together with an optional byte offset into the
/// compiled text, and implements the rule that an outer processing step fills
/// in the offset of an inner error that was not pinned to a position.
pub mod expr_error;

pub use expr_error::{EvalError, ExprError, ExprResult, ParseError};
pub use kind::ErrorKind;
