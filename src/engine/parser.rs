use tracing::{debug, trace};

use crate::{
    engine::{
        evaluator::{self, fold},
        node::Node,
        recognizer::Recognizer,
        registry::{
            Arity, Associativity, Fixity, Function, Operand, Operator, Registry, UnaryOperator,
            VariableName, Variables,
        },
        shunting_yard::to_postfix,
        tokenizer::{check_brackets, tokenize},
    },
    error::{ErrorKind, ExprError, ExprResult, ParseError},
};

/// The structural characters of the expression syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxConfig {
    /// Opens an argument list or a group.
    pub open_brace:  char,
    /// Closes an argument list or a group.
    pub close_brace: char,
    /// Separates arguments.
    pub separator:   char,
    /// Mandatory prefix of variable references. With `None`, variables are
    /// recognized by the registry and the recognizer alone.
    pub sigil:       Option<char>,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self { open_brace:  '(',
               close_brace: ')',
               separator:   ',',
               sigil:       Some('$'), }
    }
}

/// Compiles an infix expression once and evaluates it any number of times.
///
/// A parser owns its token tables, its variables, the last compiled sequence
/// and the last result. It is generic over the numeric type `N` and over the
/// recognizer `R` that reads literals of that type.
///
/// # Example
/// ```
/// use infixa::engine::{
///     parser::{Parser, SyntaxConfig},
///     recognizer::{Recognizer, Scanned},
///     registry::Associativity,
/// };
/// use infixa::error::{ErrorKind, ExprError, ExprResult};
///
/// struct Reals;
///
/// impl Recognizer<f64> for Reals {
///     fn parse_literal(&self, text: &str, pos: usize) -> ExprResult<Scanned<f64>> {
///         let len = text[pos..].bytes()
///                              .take_while(|b| b.is_ascii_digit() || *b == b'.')
///                              .count();
///         text[pos..pos + len].parse()
///                             .map(|value| Scanned::new(value, pos + len))
///                             .map_err(|_| ExprError::new(ErrorKind::InvalidNumericLiteral))
///     }
/// }
///
/// let mut parser = Parser::new(SyntaxConfig::default(), Reals);
/// parser.add_operator("+", 10, Associativity::Left, |a, b, _| Ok(a.value() + b.value()));
/// parser.add_operator("*", 5, Associativity::Left, |a, b, _| Ok(a.value() * b.value()));
/// parser.set_variable("x", 2.0).unwrap();
///
/// parser.compile("$x * (1 + 3)").unwrap();
/// parser.evaluate().unwrap();
/// assert_eq!(parser.result(), Some(&8.0));
///
/// parser.set_variable("x", 0.5).unwrap();
/// parser.evaluate().unwrap();
/// assert_eq!(parser.result(), Some(&2.0));
/// ```
pub struct Parser<N, R> {
    config:     SyntaxConfig,
    recognizer: R,
    registry:   Registry<N>,
    expression: String,
    /// `None` until a compile succeeds, and again after one fails.
    compiled:   Option<Vec<Node<N>>>,
    result:     Option<N>,
}

impl<N, R> Parser<N, R>
    where N: Clone + 'static,
          R: Recognizer<N>
{
    /// Creates a parser with an empty registry apart from the group function.
    #[must_use]
    pub fn new(config: SyntaxConfig, recognizer: R) -> Self {
        Self { config,
               recognizer,
               registry: Registry::new(),
               expression: String::new(),
               compiled: None,
               result: None }
    }

    /// Compiles `text`, replacing whatever was compiled before.
    ///
    /// Tokenizes, converts to postfix order and folds the constant parts.
    /// Identifiers discovered by the recognizer are registered on the way and
    /// stay registered even if compilation fails. Text that is empty or only
    /// whitespace compiles to an empty expression.
    ///
    /// # Errors
    /// The first [`ParseError`] met. The parser is then left with nothing
    /// compiled, and [`Parser::evaluate`] fails until the next successful
    /// compile.
    pub fn compile(&mut self, text: &str) -> Result<(), ParseError> {
        self.compiled = None;
        text.clone_into(&mut self.expression);

        if text.trim().is_empty() {
            debug!("compiled an empty expression");
            self.compiled = Some(Vec::new());
            return Ok(());
        }

        check_brackets(text, &self.config)?;
        let tokens = tokenize(text, &self.config, &mut self.registry, &self.recognizer)?;
        let token_count = tokens.len();
        let postfix = to_postfix(tokens)?;
        let postfix_len = postfix.len();
        let folded = fold(postfix, self.registry.variables_mut())?;
        if folded.is_empty() {
            let last = text.char_indices().last().map_or(0, |(offset, _)| offset);
            return Err(ExprError::at(ErrorKind::UnexpectedEndOfExpression, last));
        }

        debug!(text_len = text.len(),
               tokens = token_count,
               postfix = postfix_len,
               folded = folded.len(),
               "compiled expression");
        self.compiled = Some(folded);
        Ok(())
    }

    /// Evaluates the compiled expression against the current variables.
    ///
    /// Operators such as assignment may change variables. An empty
    /// expression evaluates to no result, and [`Parser::result`] becomes
    /// `None`.
    ///
    /// # Errors
    /// [`ErrorKind::NoSuchToken`] if nothing was compiled or the last compile
    /// failed. Otherwise the first [`EvalError`](crate::error::EvalError)
    /// met; the previous result is then kept.
    pub fn evaluate(&mut self) -> ExprResult<()> {
        trace!(expression = %self.expression, "evaluate");
        let compiled = self.compiled
                           .as_deref()
                           .ok_or_else(|| ExprError::new(ErrorKind::NoSuchToken))?;
        self.result = evaluator::evaluate(compiled, self.registry.variables_mut())?;
        Ok(())
    }

    /// The last evaluated result; `None` before the first evaluation and
    /// after evaluating an empty expression.
    #[must_use]
    pub const fn result(&self) -> Option<&N> {
        self.result.as_ref()
    }

    /// Registers a binary operator. Smaller priorities bind tighter.
    ///
    /// The empty symbol registers an implicit operator, applied between
    /// adjacent operands such as `2x` or `2(3)`. Any symbol is accepted.
    pub fn add_operator(&mut self,
                        symbol: &str,
                        priority: i32,
                        associativity: Associativity,
                        apply: impl Fn(Operand<N>, Operand<N>, &mut Variables<N>) -> ExprResult<N> + 'static) {
        self.registry
            .add_operator(Operator::new(symbol, priority, associativity, apply));
    }

    /// Registers a prefix or postfix unary operator.
    ///
    /// # Errors
    /// [`ErrorKind::EmptyName`](crate::error::ErrorKind::EmptyName) for an
    /// empty symbol.
    pub fn add_unary_operator(&mut self,
                              symbol: &str,
                              fixity: Fixity,
                              priority: i32,
                              apply: impl Fn(N) -> ExprResult<N> + 'static)
                              -> ExprResult<()> {
        self.registry
            .add_unary_operator(UnaryOperator::new(symbol, fixity, priority, apply))
    }

    /// Registers a function.
    ///
    /// # Errors
    /// [`ErrorKind::EmptyName`](crate::error::ErrorKind::EmptyName) for an
    /// empty name.
    pub fn add_function(&mut self,
                        name: &str,
                        arity: Arity,
                        apply: impl Fn(&[N]) -> ExprResult<N> + 'static)
                        -> ExprResult<()> {
        self.registry.add_function(name, Function::new(arity, apply))
    }

    /// Stores a variable. Integer ids are stored under their decimal form.
    ///
    /// # Errors
    /// [`ErrorKind::EmptyName`](crate::error::ErrorKind::EmptyName) for an
    /// empty name.
    pub fn set_variable(&mut self, name: impl VariableName, value: N) -> ExprResult<()> {
        self.registry.set_variable(name, value)
    }

    /// Reads a variable.
    #[must_use]
    pub fn get_variable(&self, name: impl VariableName) -> Option<&N> {
        self.registry.get_variable(name)
    }

    /// Removes a variable. Returns whether it existed.
    pub fn remove_variable(&mut self, name: impl VariableName) -> bool {
        self.registry.remove_variable(name)
    }

    /// Drops every variable and stores `bindings` instead.
    ///
    /// # Errors
    /// [`ErrorKind::EmptyName`](crate::error::ErrorKind::EmptyName) if a
    /// binding has an empty name; the bindings before it are kept.
    ///
    /// # Example
    /// ```
    /// # use infixa::complex::{new_parser, Value};
    /// let mut parser = new_parser().unwrap();
    /// parser.set_variable("old", Value::from(1.0)).unwrap();
    ///
    /// parser.replace_variables([(0_usize, Value::from(2.0)), (1, Value::from(3.0))])
    ///       .unwrap();
    /// assert!(parser.get_variable("old").is_none());
    /// assert_eq!(parser.get_variable(1_usize), Some(&Value::from(3.0)));
    /// ```
    pub fn replace_variables<K>(&mut self, bindings: impl IntoIterator<Item = (K, N)>) -> ExprResult<()>
        where K: VariableName
    {
        self.registry.variables_mut().clear();
        for (name, value) in bindings {
            self.registry.set_variable(name, value)?;
        }
        Ok(())
    }

    /// The text passed to the last [`Parser::compile`].
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The compiled, folded postfix sequence; empty when nothing is
    /// compiled.
    #[must_use]
    pub fn compiled(&self) -> &[Node<N>] {
        self.compiled.as_deref().unwrap_or_default()
    }

    /// The parser's token tables and variables.
    #[must_use]
    pub const fn registry(&self) -> &Registry<N> {
        &self.registry
    }

    /// The syntax this parser was built with.
    #[must_use]
    pub const fn config(&self) -> &SyntaxConfig {
        &self.config
    }
}

impl<N, R> std::fmt::Debug for Parser<N, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
         .field("config", &self.config)
         .field("registry", &self.registry)
         .field("expression", &self.expression)
         .field("compiled", &self.compiled.as_ref().map(Vec::len))
         .finish_non_exhaustive()
    }
}
