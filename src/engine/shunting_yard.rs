use crate::{
    engine::{
        node::{Node, NodeKind},
        registry::{Function, Operator, UnaryOperator},
        token::{Token, TokenKind},
    },
    error::{ErrorKind, ExprError, ExprResult},
};

/// An entry of the operator stack.
enum Pending<N> {
    /// An open call, waiting for its close brace.
    Call {
        function: Function<N>,
        offset:   usize,
        prefix:   Vec<UnaryOperator<N>>,
    },
    Operator {
        operator: Operator<N>,
        offset:   usize,
    },
}

impl<N> Pending<N> {
    /// Turns an entry into an output node. Calls become functions of `arity`
    /// arguments carrying the operators written after their close brace.
    fn into_node(self, arity: usize, postfix: Vec<UnaryOperator<N>>) -> Node<N> {
        match self {
            Self::Call { function,
                         offset,
                         prefix, } => Node { kind: NodeKind::Function { function, arity },
                                             offset,
                                             prefix,
                                             postfix },
            Self::Operator { operator, offset } => Node::new(NodeKind::Operator(operator), offset),
        }
    }
}

/// Rearranges classified tokens into postfix order.
///
/// Binary operators leave the stack when an incoming operator displaces them
/// (see [`Operator::displaces`]); calls act as barriers that only their own
/// separator or close brace can reach.
///
/// # Errors
/// [`ErrorKind::NoSuchToken`] for a separator outside any call and
/// [`ErrorKind::BracketMismatch`] for a close brace without an open call,
/// each at the offending token.
pub fn to_postfix<N>(tokens: Vec<Token<N>>) -> ExprResult<Vec<Node<N>>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Pending<N>> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number(value) => {
                output.push(operand(NodeKind::Number(value), token.offset, token.prefix, token.postfix));
            },
            TokenKind::Variable(name) => {
                output.push(operand(NodeKind::Variable(name), token.offset, token.prefix, token.postfix));
            },
            TokenKind::Call { function, .. } => stack.push(Pending::Call { function,
                                                                           offset: token.offset,
                                                                           prefix: token.prefix }),
            TokenKind::Operator(operator) => {
                while let Some(Pending::Operator { operator: top, .. }) = stack.last()
                      && operator.displaces(top)
                {
                    if let Some(entry) = stack.pop() {
                        output.push(entry.into_node(0, Vec::new()));
                    }
                }
                stack.push(Pending::Operator { operator,
                                               offset: token.offset });
            },
            TokenKind::Separator => {
                unwind_to_call(&mut stack, &mut output);
                if stack.is_empty() {
                    return Err(ExprError::at(ErrorKind::NoSuchToken, token.offset));
                }
            },
            TokenKind::Close { arity } => {
                unwind_to_call(&mut stack, &mut output);
                let call = stack.pop()
                                .ok_or_else(|| ExprError::at(ErrorKind::BracketMismatch, token.offset))?;
                output.push(call.into_node(arity, token.postfix));
            },
        }
    }

    while let Some(entry) = stack.pop() {
        if let Pending::Call { offset, .. } = entry {
            return Err(ExprError::at(ErrorKind::BracketMismatch, offset));
        }
        output.push(entry.into_node(0, Vec::new()));
    }

    Ok(output)
}

fn operand<N>(kind: NodeKind<N>,
              offset: usize,
              prefix: Vec<UnaryOperator<N>>,
              postfix: Vec<UnaryOperator<N>>)
              -> Node<N> {
    Node { kind,
           offset,
           prefix,
           postfix }
}

/// Moves operators to the output until an open call is on top of the stack.
fn unwind_to_call<N>(stack: &mut Vec<Pending<N>>, output: &mut Vec<Node<N>>) {
    while let Some(Pending::Operator { .. }) = stack.last() {
        if let Some(entry) = stack.pop() {
            output.push(entry.into_node(0, Vec::new()));
        }
    }
}
