use std::{borrow::Cow, cmp::Ordering, collections::BTreeMap, fmt, rc::Rc};

use tracing::debug;

use crate::error::{ErrorKind, ExprError, ExprResult};

/// Implementation of a binary operator.
///
/// Receives the resolved left and right operands and the variable storage, so
/// that an assignment operator can write through a [`Operand::Slot`].
pub type BinaryFn<N> = Rc<dyn Fn(Operand<N>, Operand<N>, &mut Variables<N>) -> ExprResult<N>>;
/// Implementation of a prefix or postfix unary operator.
pub type UnaryFn<N> = Rc<dyn Fn(N) -> ExprResult<N>>;
/// Implementation of a function; receives the evaluated arguments in call
/// order.
pub type FunctionFn<N> = Rc<dyn Fn(&[N]) -> ExprResult<N>>;

/// Key of a token table.
///
/// Keys order by length first and bytes second. Walking a table backwards
/// therefore visits longer keys before shorter ones, which is what
/// [`TokenTable::longest_match`] relies on.
///
/// # Example
/// ```
/// use infixa::engine::registry::TokenKey;
///
/// assert!(TokenKey::from("zz") < TokenKey::from("aaa"));
/// assert!(TokenKey::from("ab") < TokenKey::from("ba"));
/// assert!(TokenKey::from("") < TokenKey::from("+"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenKey(String);

impl TokenKey {
    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the key in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Ord for TokenKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.as_bytes().cmp(other.0.as_bytes()))
    }
}

impl PartialOrd for TokenKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for TokenKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TokenKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A table of tokens keyed by their text.
///
/// Lookup always yields the longest registered key that is a prefix of the
/// remaining input, independent of insertion order.
///
/// # Example
/// ```
/// use infixa::engine::registry::TokenTable;
///
/// let mut table = TokenTable::new();
/// table.insert("+", 1);
/// table.insert("++", 2);
///
/// let (key, value) = table.longest_match("++x").unwrap();
/// assert_eq!((key.as_str(), *value), ("++", 2));
///
/// let (key, value) = table.longest_match("+x").unwrap();
/// assert_eq!((key.as_str(), *value), ("+", 1));
///
/// assert!(table.longest_match("x").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TokenTable<T> {
    entries: BTreeMap<TokenKey, T>,
}

impl<T> Default for TokenTable<T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<T> TokenTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry under `key`.
    pub fn insert(&mut self, key: impl Into<TokenKey>, value: T) -> Option<T> {
        self.entries.insert(key.into(), value)
    }

    /// Returns the entry registered under exactly `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(&TokenKey::from(key))
    }

    /// Returns the entry registered under exactly `key`, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(&TokenKey::from(key))
    }

    /// Removes the entry under `key`.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.remove(&TokenKey::from(key))
    }

    /// Whether an entry exists under exactly `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&TokenKey::from(key))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the entries from the shortest key to the longest.
    pub fn iter(&self) -> impl Iterator<Item = (&TokenKey, &T)> {
        self.entries.iter()
    }

    /// Finds the longest key that `input` starts with.
    ///
    /// The empty key, when registered, matches any input.
    #[must_use]
    pub fn longest_match(&self, input: &str) -> Option<(&TokenKey, &T)> {
        self.entries
            .iter()
            .rev()
            .skip_while(|(key, _)| key.len() > input.len())
            .find(|(key, _)| input.starts_with(key.as_str()))
    }
}

/// Tie-break rule for binary operators of equal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    Right,
}

/// Where a unary operator stands relative to its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    /// Written before the operand, like `-x`.
    Prefix,
    /// Written after the operand, like `x!`.
    Postfix,
}

/// The number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Fixed(usize),
    /// Any number of arguments, including none. The count seen at each call
    /// site is recorded when that call is closed.
    Unbounded,
}

/// A resolved operand handed to a binary operator.
///
/// A bare variable reference with no pending unary operators arrives as a
/// [`Operand::Slot`], naming the storage it came from. Everything else is a
/// computed [`Operand::Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<N> {
    /// A computed value with no storage behind it.
    Value(N),
    /// The current value of a named variable.
    Slot {
        /// The variable name, usable as a key into [`Variables`].
        name:  String,
        /// A copy of the value stored under `name`.
        value: N,
    },
}

impl<N> Operand<N> {
    /// The operand's value, whether computed or stored.
    #[must_use]
    pub const fn value(&self) -> &N {
        match self {
            Self::Value(value) | Self::Slot { value, .. } => value,
        }
    }

    /// Consumes the operand and returns its value.
    #[must_use]
    pub fn into_value(self) -> N {
        match self {
            Self::Value(value) | Self::Slot { value, .. } => value,
        }
    }

    /// The variable name behind a slot operand.
    #[must_use]
    pub fn slot_name(&self) -> Option<&str> {
        match self {
            Self::Slot { name, .. } => Some(name),
            Self::Value(_) => None,
        }
    }
}

/// A registered binary operator.
#[derive(Clone)]
pub struct Operator<N> {
    symbol:        String,
    priority:      i32,
    associativity: Associativity,
    apply:         BinaryFn<N>,
}

impl<N> Operator<N> {
    /// Creates an operator. Smaller priorities bind tighter.
    pub fn new(symbol: impl Into<String>,
               priority: i32,
               associativity: Associativity,
               apply: impl Fn(Operand<N>, Operand<N>, &mut Variables<N>) -> ExprResult<N> + 'static)
               -> Self {
        Self { symbol: symbol.into(),
               priority,
               associativity,
               apply: Rc::new(apply) }
    }

    /// The operator's text; empty for an implicit operator.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The operator's priority. Smaller values bind tighter.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// The operator's associativity.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        self.associativity
    }

    /// Whether this operator, arriving after `top`, pops `top` off the
    /// operator stack.
    ///
    /// A right-associative operator only displaces strictly tighter operators;
    /// a left-associative one also displaces operators of the same priority.
    ///
    /// # Example
    /// ```
    /// use infixa::engine::registry::{Associativity, Operator};
    ///
    /// let add = Operator::<f64>::new("+", 10, Associativity::Left, |a, b, _| {
    ///     Ok(a.value() + b.value())
    /// });
    /// let pow = Operator::<f64>::new("^", 4, Associativity::Right, |a, b, _| {
    ///     Ok(a.value().powf(*b.value()))
    /// });
    ///
    /// assert!(add.displaces(&add));
    /// assert!(add.displaces(&pow));
    /// assert!(!pow.displaces(&pow));
    /// assert!(!pow.displaces(&add));
    /// ```
    #[must_use]
    pub fn displaces(&self, top: &Self) -> bool {
        match self.associativity {
            Associativity::Right => self.priority > top.priority,
            Associativity::Left => self.priority >= top.priority,
        }
    }

    /// Applies the operator.
    pub fn apply(&self,
                 left: Operand<N>,
                 right: Operand<N>,
                 variables: &mut Variables<N>)
                 -> ExprResult<N> {
        (self.apply)(left, right, variables)
    }
}

impl<N> fmt::Debug for Operator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
         .field("symbol", &self.symbol)
         .field("priority", &self.priority)
         .field("associativity", &self.associativity)
         .finish_non_exhaustive()
    }
}

/// A registered prefix or postfix unary operator.
#[derive(Clone)]
pub struct UnaryOperator<N> {
    symbol:   String,
    priority: i32,
    fixity:   Fixity,
    apply:    UnaryFn<N>,
}

impl<N> UnaryOperator<N> {
    /// Creates a unary operator. Smaller priorities bind tighter.
    pub fn new(symbol: impl Into<String>,
               fixity: Fixity,
               priority: i32,
               apply: impl Fn(N) -> ExprResult<N> + 'static)
               -> Self {
        Self { symbol: symbol.into(),
               priority,
               fixity,
               apply: Rc::new(apply) }
    }

    /// The operator's text.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The operator's priority. Smaller values bind tighter.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether the operator is written before or after its operand.
    #[must_use]
    pub const fn fixity(&self) -> Fixity {
        self.fixity
    }

    /// Applies the operator.
    pub fn apply(&self, value: N) -> ExprResult<N> {
        (self.apply)(value)
    }
}

impl<N> fmt::Debug for UnaryOperator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryOperator")
         .field("symbol", &self.symbol)
         .field("priority", &self.priority)
         .field("fixity", &self.fixity)
         .finish_non_exhaustive()
    }
}

/// A registered function.
#[derive(Clone)]
pub struct Function<N> {
    arity: Arity,
    apply: FunctionFn<N>,
}

impl<N> Function<N> {
    /// Creates a function with the given arity.
    pub fn new(arity: Arity, apply: impl Fn(&[N]) -> ExprResult<N> + 'static) -> Self {
        Self { arity,
               apply: Rc::new(apply) }
    }

    /// The function's arity.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Calls the function.
    pub fn call(&self, arguments: &[N]) -> ExprResult<N> {
        (self.apply)(arguments)
    }
}

impl<N: Clone> Function<N> {
    /// The anonymous one-argument function used for parenthesized groups.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Arity::Fixed(1), |arguments: &[N]| {
            arguments.first()
                     .cloned()
                     .ok_or_else(|| ExprError::new(ErrorKind::WrongArgumentCount { expected: 1,
                                                                                    actual:   0, }))
        })
    }
}

impl<N> fmt::Debug for Function<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// Flat variable storage, owned by one parser instance.
pub type Variables<N> = TokenTable<N>;

/// A variable key: a name, or an integer id standing for its decimal form.
///
/// # Example
/// ```
/// use infixa::engine::registry::VariableName;
///
/// assert_eq!(7_usize.variable_name(), "7");
/// assert_eq!("x".variable_name(), "x");
/// ```
pub trait VariableName {
    /// The storage key this value stands for.
    fn variable_name(&self) -> Cow<'_, str>;
}

impl VariableName for &str {
    fn variable_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl VariableName for String {
    fn variable_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl VariableName for &String {
    fn variable_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl VariableName for usize {
    fn variable_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

/// Holds every token table of one parser instance.
///
/// A fresh registry already contains the anonymous identity function under
/// the empty name; parenthesized groups compile to calls of it. The public
/// registration methods cannot replace it.
pub struct Registry<N> {
    operators: TokenTable<Operator<N>>,
    prefix:    TokenTable<UnaryOperator<N>>,
    postfix:   TokenTable<UnaryOperator<N>>,
    functions: TokenTable<Function<N>>,
    variables: Variables<N>,
}

impl<N: Clone + 'static> Default for Registry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + 'static> Registry<N> {
    /// Creates a registry holding only the identity function.
    #[must_use]
    pub fn new() -> Self {
        let mut functions = TokenTable::new();
        functions.insert("", Function::identity());

        Self { operators: TokenTable::new(),
               prefix: TokenTable::new(),
               postfix: TokenTable::new(),
               functions,
               variables: TokenTable::new() }
    }
}

impl<N> Registry<N> {
    /// Registers a binary operator.
    ///
    /// The empty symbol is allowed and registers an implicit operator, applied
    /// wherever two operands stand next to each other.
    pub fn add_operator(&mut self, operator: Operator<N>) {
        debug!(symbol = operator.symbol(),
               priority = operator.priority(),
               "registering operator");
        self.operators.insert(operator.symbol.clone(), operator);
    }

    /// Registers a prefix or postfix unary operator.
    ///
    /// # Errors
    /// [`ErrorKind::EmptyName`] if the symbol is empty.
    pub fn add_unary_operator(&mut self, operator: UnaryOperator<N>) -> ExprResult<()> {
        if operator.symbol.is_empty() {
            debug!("rejected unary operator with an empty symbol");
            return Err(ExprError::new(ErrorKind::EmptyName));
        }
        let table = match operator.fixity {
            Fixity::Prefix => &mut self.prefix,
            Fixity::Postfix => &mut self.postfix,
        };
        table.insert(operator.symbol.clone(), operator);
        Ok(())
    }

    /// Registers a function.
    ///
    /// # Errors
    /// [`ErrorKind::EmptyName`] if `name` is empty; the empty name is reserved
    /// for parenthesized groups.
    pub fn add_function(&mut self, name: &str, function: Function<N>) -> ExprResult<()> {
        if name.is_empty() {
            debug!("rejected function with an empty name");
            return Err(ExprError::new(ErrorKind::EmptyName));
        }
        self.functions.insert(name, function);
        Ok(())
    }

    /// Stores `value` under `name`, replacing any previous value.
    ///
    /// # Errors
    /// [`ErrorKind::EmptyName`] if the name is empty.
    pub fn set_variable(&mut self, name: impl VariableName, value: N) -> ExprResult<()> {
        let name = name.variable_name();
        if name.is_empty() {
            return Err(ExprError::new(ErrorKind::EmptyName));
        }
        self.variables.insert(name.into_owned(), value);
        Ok(())
    }

    /// Returns the value stored under `name`.
    #[must_use]
    pub fn get_variable(&self, name: impl VariableName) -> Option<&N> {
        self.variables.get(&name.variable_name())
    }

    /// Removes the variable `name`. Returns whether it existed.
    pub fn remove_variable(&mut self, name: impl VariableName) -> bool {
        self.variables.remove(&name.variable_name()).is_some()
    }

    /// The binary operator table.
    #[must_use]
    pub const fn operators(&self) -> &TokenTable<Operator<N>> {
        &self.operators
    }

    /// The prefix or postfix unary operator table.
    #[must_use]
    pub const fn unary_operators(&self, fixity: Fixity) -> &TokenTable<UnaryOperator<N>> {
        match fixity {
            Fixity::Prefix => &self.prefix,
            Fixity::Postfix => &self.postfix,
        }
    }

    /// The function table, including the anonymous identity function.
    #[must_use]
    pub const fn functions(&self) -> &TokenTable<Function<N>> {
        &self.functions
    }

    /// The variable storage.
    #[must_use]
    pub const fn variables(&self) -> &Variables<N> {
        &self.variables
    }

    /// The variable storage, mutably.
    pub const fn variables_mut(&mut self) -> &mut Variables<N> {
        &mut self.variables
    }
}

/// Collects the keys of a table for debug output.
fn key_list<T>(table: &TokenTable<T>) -> Vec<&str> {
    table.iter().map(|(key, _)| key.as_str()).collect()
}

impl<N> fmt::Debug for Registry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
         .field("operators", &key_list(&self.operators))
         .field("prefix", &key_list(&self.prefix))
         .field("postfix", &key_list(&self.postfix))
         .field("functions", &key_list(&self.functions))
         .field("variables", &key_list(&self.variables))
         .finish()
    }
}
