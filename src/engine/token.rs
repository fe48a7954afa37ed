use crate::engine::registry::{Function, Operator, UnaryOperator};

/// What a classified token is.
#[derive(Debug, Clone)]
pub enum TokenKind<N> {
    /// A numeric literal.
    Number(N),
    /// A reference to a variable, by name.
    Variable(String),
    /// The start of a call: a function name together with its open brace.
    /// Parenthesized groups are calls of the function with the empty name.
    Call {
        /// The registered name of the function.
        name:     String,
        /// The function being called.
        function: Function<N>,
    },
    /// A binary operator.
    Operator(Operator<N>),
    /// The argument separator.
    Separator,
    /// The close brace of a call, with the argument count it closed over.
    Close {
        /// The number of arguments the call received.
        arity: usize,
    },
}

/// A classified token, as produced by the tokenizer.
///
/// Operands and calls carry the unary operators written around them. For
/// [`TokenKind::Close`], `postfix` holds the postfix operators written after
/// the close brace, which belong to the call being closed.
#[derive(Debug, Clone)]
pub struct Token<N> {
    /// What the token is.
    pub kind:    TokenKind<N>,
    /// Byte offset where the token starts.
    pub offset:  usize,
    /// Prefix operators, in the order they were written.
    pub prefix:  Vec<UnaryOperator<N>>,
    /// Postfix operators, in the order they were written.
    pub postfix: Vec<UnaryOperator<N>>,
}

impl<N> Token<N> {
    /// Creates a token with no unary operators attached.
    pub const fn new(kind: TokenKind<N>, offset: usize) -> Self {
        Self { kind,
               offset,
               prefix: Vec::new(),
               postfix: Vec::new() }
    }
}
