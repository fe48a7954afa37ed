use crate::engine::registry::{Function, Operator, UnaryOperator};

/// What a postfix node is.
#[derive(Debug, Clone)]
pub enum NodeKind<N> {
    /// A literal or folded value.
    Number(N),
    /// A reference to a variable, resolved against storage on evaluation.
    Variable(String),
    /// A binary operator applied to the two operands before it.
    Operator(Operator<N>),
    /// A function applied to the `arity` operands before it.
    Function {
        /// The function being called.
        function: Function<N>,
        /// The argument count of this call site.
        arity:    usize,
    },
}

/// One element of the compiled postfix sequence.
///
/// # Example
/// ```
/// use infixa::engine::node::Node;
///
/// let node = Node::number(2.0_f64, 3);
/// assert!(node.is_number());
/// assert!(node.is_value_or_variable());
/// assert_eq!(node.offset, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Node<N> {
    /// What the node is.
    pub kind:    NodeKind<N>,
    /// Byte offset where the node's text starts.
    pub offset:  usize,
    /// Pending prefix operators, outermost first.
    pub prefix:  Vec<UnaryOperator<N>>,
    /// Pending postfix operators, innermost first.
    pub postfix: Vec<UnaryOperator<N>>,
}

impl<N> Node<N> {
    /// Creates a node with no pending unary operators.
    pub const fn new(kind: NodeKind<N>, offset: usize) -> Self {
        Self { kind,
               offset,
               prefix: Vec::new(),
               postfix: Vec::new() }
    }

    /// Creates a literal node.
    pub const fn number(value: N, offset: usize) -> Self {
        Self::new(NodeKind::Number(value), offset)
    }

    /// Whether the node is a literal value.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self.kind, NodeKind::Number(_))
    }

    /// Whether the node is a value or a variable, the operands the final pass
    /// accepts.
    #[must_use]
    pub const fn is_value_or_variable(&self) -> bool {
        matches!(self.kind, NodeKind::Number(_) | NodeKind::Variable(_))
    }
}
