use thiserror::Error;

/// Represents every kind of failure that can occur while compiling or
/// evaluating an expression.
///
/// The kind carries the data needed to describe the failure. The position in
/// the source text is kept separately by [`ExprError`](super::ExprError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Opening and closing braces do not pair up.
    #[error("Mismatched brackets")]
    BracketMismatch,
    /// A variable reference introduced by the sigil names no known variable.
    #[error("Bad variable")]
    NoSuchVariable,
    /// A name in call position is neither registered nor discoverable.
    #[error("No such function '{0}'")]
    NoSuchFunction(String),
    /// Unrecognized token or grammar violation.
    #[error("Bad token")]
    NoSuchToken,
    /// A numeric literal could not be read.
    #[error("Bad numeric token")]
    InvalidNumericLiteral,
    /// A call supplied a different number of arguments than the function
    /// accepts.
    #[error("Function requires {expected} arguments but {actual} given")]
    WrongArgumentCount {
        /// The registered arity.
        expected: usize,
        /// The number of arguments found.
        actual:   usize,
    },
    /// The expression stopped where an operand was still required.
    #[error("Unexpected end of expression")]
    UnexpectedEndOfExpression,
    /// An assignment-like operator received something other than a variable
    /// slot on its left side.
    #[error("Can't assign value to an numeric operand")]
    CannotAssignToNonVariable,
    /// Declared for numeric configurations; the engine never raises it.
    #[error("Division by zero")]
    DivisionByZero,
    /// A failure specific to a numeric configuration, with its own message.
    #[error("{0}")]
    Domain(String),
    /// A registration was attempted under the empty name where it is not
    /// permitted.
    #[error("Token name must not be empty")]
    EmptyName,
    /// Reserved. Reaching it indicates an engine defect.
    #[error("Arguments not allowed at the top level expression")]
    TopLevelArgumentsNotAllowed,
    /// Reserved. Reaching it indicates an engine defect.
    #[error("Parser's tree leaf is already initialized")]
    TreeAlreadyInitialized,
    /// Reserved. Reaching it indicates an engine defect.
    #[error("Parser's tree leaf was not properly initialized")]
    TreeNotInitialized,
}
