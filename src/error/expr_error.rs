use thiserror::Error;

use crate::error::ErrorKind;

/// Result type used throughout the engine.
pub type ExprResult<T> = Result<T, ExprError>;

/// Error returned by [`Parser::compile`](crate::engine::parser::Parser::compile).
pub type ParseError = ExprError;

/// Error returned by
/// [`Parser::evaluate`](crate::engine::parser::Parser::evaluate).
pub type EvalError = ExprError;

/// An [`ErrorKind`] pinned, when known, to a byte offset in the compiled text.
///
/// Errors are raised without an offset wherever the raising code does not know
/// its position (numeric plugins, registry lookups). The caller that does know
/// the position attaches it with [`ExprError::or_offset`], which never
/// replaces an offset that is already set.
///
/// # Example
/// ```
/// use infixa::error::{ErrorKind, ExprError};
///
/// let inner = ExprError::new(ErrorKind::NoSuchToken);
/// assert_eq!(inner.to_string(), "Bad token");
///
/// let outer = inner.or_offset(4);
/// assert_eq!(outer.offset(), Some(4));
/// assert_eq!(outer.to_string(), "Bad token at position 5");
///
/// // An offset that is already set wins.
/// assert_eq!(outer.or_offset(9).offset(), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", position_suffix(.offset))]
pub struct ExprError {
    kind:   ErrorKind,
    offset: Option<usize>,
}

impl ExprError {
    /// Creates an error that is not yet pinned to a position.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind,
               offset: None }
    }

    /// Creates an error at a known byte offset.
    #[must_use]
    pub const fn at(kind: ErrorKind, offset: usize) -> Self {
        Self { kind,
               offset: Some(offset) }
    }

    /// Shorthand for a [`ErrorKind::Domain`] error with a custom message.
    #[must_use]
    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Domain(message.into()))
    }

    /// Fills in `offset` if this error does not carry one yet.
    #[must_use]
    pub const fn or_offset(mut self, offset: usize) -> Self {
        if self.offset.is_none() {
            self.offset = Some(offset);
        }
        self
    }

    /// The kind of failure.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The byte offset of the failure, if known.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl From<ErrorKind> for ExprError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Renders the 1-based position the way messages report it.
#[allow(clippy::ref_option)]
fn position_suffix(offset: &Option<usize>) -> String {
    (*offset).map_or_else(String::new, |offset| format!(" at position {}", offset + 1))
}
