use tracing::trace;

use crate::{
    engine::{
        node::{Node, NodeKind},
        registry::{Function, Operand, Operator, UnaryOperator, Variables},
    },
    error::{ErrorKind, ExprError, ExprResult},
};

/// Folds every subexpression whose operands are all literals.
///
/// Functions and operators over literal operands are applied once, here, and
/// replaced by their result. Anything that touches a variable is kept for
/// [`evaluate`]. A folded function keeps the unary operators and position of
/// its call site.
///
/// # Errors
/// [`ErrorKind::WrongArgumentCount`] when a function finds fewer entries than
/// its arity, [`ErrorKind::UnexpectedEndOfExpression`] when an operator finds
/// fewer than two, and anything raised by the numeric plugins. Errors without
/// a position are pinned to the node being processed.
pub fn fold<N: Clone>(nodes: Vec<Node<N>>, variables: &mut Variables<N>) -> ExprResult<Vec<Node<N>>> {
    let mut stack: Vec<Node<N>> = Vec::with_capacity(nodes.len());

    for node in nodes {
        let offset = node.offset;
        fold_node(node, &mut stack, variables).map_err(|e| e.or_offset(offset))?;
    }

    Ok(stack)
}

fn fold_node<N: Clone>(node: Node<N>,
                       stack: &mut Vec<Node<N>>,
                       variables: &mut Variables<N>)
                       -> ExprResult<()> {
    match &node.kind {
        NodeKind::Number(_) | NodeKind::Variable(_) => stack.push(node),
        NodeKind::Function { function, arity } => {
            let first = argument_start(stack.len(), *arity)?;

            if stack[first..].iter().all(Node::is_number) {
                let arguments = stack.split_off(first);
                let result = call(function, &arguments, variables)?;
                stack.push(Node { kind: NodeKind::Number(result),
                                  ..node });
            } else {
                stack.push(node);
            }
        },
        NodeKind::Operator(operator) => {
            if stack.len() < 2 {
                return Err(ExprError::new(ErrorKind::UnexpectedEndOfExpression));
            }

            if stack[stack.len() - 2..].iter().all(Node::is_number)
               && let (Some(right), Some(left)) = (stack.pop(), stack.pop())
            {
                stack.push(apply_operator(operator, left, right, node.offset, variables)?);
            } else {
                stack.push(node);
            }
        },
    }
    Ok(())
}

/// Evaluates folded nodes against the current variables.
///
/// Returns `None` for an empty sequence. Assignment-like operators may write
/// to `variables` through [`Operand::Slot`].
///
/// # Errors
/// [`ErrorKind::NoSuchToken`] for a variable that no longer exists or an
/// operand that is not a value, the arity errors of [`fold`], and anything
/// raised by the numeric plugins.
pub fn evaluate<N: Clone>(nodes: &[Node<N>], variables: &mut Variables<N>) -> ExprResult<Option<N>> {
    let mut stack: Vec<Node<N>> = Vec::with_capacity(nodes.len());

    for node in nodes {
        trace!(offset = node.offset, "evaluating node");
        evaluate_node(node, &mut stack, variables).map_err(|e| e.or_offset(node.offset))?;
    }

    let Some(last) = stack.last() else {
        return if nodes.is_empty() {
            Ok(None)
        } else {
            Err(ExprError::new(ErrorKind::NoSuchToken))
        };
    };

    if !last.is_value_or_variable() {
        return Err(ExprError::at(ErrorKind::NoSuchToken, last.offset));
    }
    resolve_operand(last, &last.prefix, variables).map(|operand| Some(operand.into_value()))
                                                  .map_err(|e| e.or_offset(last.offset))
}

fn evaluate_node<N: Clone>(node: &Node<N>,
                           stack: &mut Vec<Node<N>>,
                           variables: &mut Variables<N>)
                           -> ExprResult<()> {
    match &node.kind {
        NodeKind::Number(_) => stack.push(node.clone()),
        NodeKind::Variable(name) => {
            if !variables.contains(name) {
                return Err(ExprError::at(ErrorKind::NoSuchToken, node.offset));
            }
            stack.push(node.clone());
        },
        NodeKind::Function { function, arity } => {
            let first = argument_start(stack.len(), *arity)?;

            if let Some(bad) = stack[first..].iter().find(|arg| !arg.is_value_or_variable()) {
                return Err(ExprError::at(ErrorKind::NoSuchToken, bad.offset));
            }

            let arguments = stack.split_off(first);
            let result = call(function, &arguments, variables)?;
            stack.push(Node { kind: NodeKind::Number(result),
                              offset: node.offset,
                              prefix: node.prefix.clone(),
                              postfix: node.postfix.clone() });
        },
        NodeKind::Operator(operator) => {
            let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                return Err(ExprError::new(ErrorKind::UnexpectedEndOfExpression));
            };

            if !left.is_value_or_variable() {
                return Err(ExprError::at(ErrorKind::NoSuchToken, left.offset));
            }
            if !right.is_value_or_variable() {
                return Err(ExprError::at(ErrorKind::NoSuchToken, right.offset));
            }

            stack.push(apply_operator(operator, left, right, node.offset, variables)?);
        },
    }
    Ok(())
}

/// Index of the first argument of an `arity`-argument call on a stack of
/// `len` entries.
fn argument_start(len: usize, arity: usize) -> ExprResult<usize> {
    len.checked_sub(arity)
       .ok_or_else(|| ExprError::new(ErrorKind::WrongArgumentCount { expected: arity,
                                                                    actual:   len, }))
}

fn call<N: Clone>(function: &Function<N>,
                  arguments: &[Node<N>],
                  variables: &Variables<N>)
                  -> ExprResult<N> {
    let values = arguments.iter()
                          .map(|arg| resolve_operand(arg, &arg.prefix, variables).map(Operand::into_value))
                          .collect::<ExprResult<Vec<_>>>()?;
    function.call(&values)
}

/// Applies a binary operator to two operand nodes.
///
/// Prefix operators of the left operand that bind looser than the operator
/// (a higher priority value) are not applied to the operand. They move onto
/// the result, so that `-2^2` computes `-(2^2)`. The right operand's prefix
/// operators always apply to it directly.
fn apply_operator<N: Clone>(operator: &Operator<N>,
                            left: Node<N>,
                            right: Node<N>,
                            offset: usize,
                            variables: &mut Variables<N>)
                            -> ExprResult<Node<N>> {
    let split = left.prefix
                    .iter()
                    .position(|unary| unary.priority() <= operator.priority())
                    .unwrap_or(left.prefix.len());
    let (deferred, immediate) = left.prefix.split_at(split);

    let lhs = resolve_operand(&left, immediate, variables)?;
    let rhs = resolve_operand(&right, &right.prefix, variables)?;
    let value = operator.apply(lhs, rhs, variables)?;

    Ok(Node { kind: NodeKind::Number(value),
              offset,
              prefix: deferred.to_vec(),
              postfix: Vec::new() })
}

/// Produces the operand a node stands for, applying its postfix operators in
/// order and then the given prefix operators from the innermost outwards.
///
/// A variable with no operators to apply stays a [`Operand::Slot`].
fn resolve_operand<N: Clone>(node: &Node<N>,
                             prefix: &[UnaryOperator<N>],
                             variables: &Variables<N>)
                             -> ExprResult<Operand<N>> {
    let mut value = match &node.kind {
        NodeKind::Number(value) => value.clone(),
        NodeKind::Variable(name) => {
            let value = variables.get(name)
                                 .cloned()
                                 .ok_or_else(|| ExprError::at(ErrorKind::NoSuchToken, node.offset))?;
            if prefix.is_empty() && node.postfix.is_empty() {
                return Ok(Operand::Slot { name: name.clone(),
                                          value });
            }
            value
        },
        NodeKind::Operator(_) | NodeKind::Function { .. } => {
            return Err(ExprError::at(ErrorKind::NoSuchToken, node.offset));
        },
    };

    for unary in &node.postfix {
        value = unary.apply(value)?;
    }
    for unary in prefix.iter().rev() {
        value = unary.apply(value)?;
    }
    Ok(Operand::Value(value))
}
