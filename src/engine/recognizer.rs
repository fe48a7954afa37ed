use crate::{engine::registry::Function, error::ExprResult};

/// Something a recognizer found at a position in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned<T> {
    /// What was recognized.
    pub item: T,
    /// Byte offset just past the recognized text.
    pub end:  usize,
}

impl<T> Scanned<T> {
    /// Creates a scan result ending at `end`.
    pub const fn new(item: T, end: usize) -> Self {
        Self { item, end }
    }
}

/// The embedder's hooks into tokenization.
///
/// A recognizer supplies the literal syntax of its numeric type and may
/// discover identifiers the registry does not know yet. Every hook receives
/// the whole expression text and the byte offset to look at.
///
/// # Example
/// ```
/// use infixa::{
///     engine::recognizer::{Recognizer, Scanned},
///     error::{ErrorKind, ExprError, ExprResult},
/// };
///
/// struct Integers;
///
/// impl Recognizer<i64> for Integers {
///     fn parse_literal(&self, text: &str, pos: usize) -> ExprResult<Scanned<i64>> {
///         let digits = text[pos..].bytes().take_while(u8::is_ascii_digit).count();
///         text[pos..pos + digits].parse()
///                                .map(|value| Scanned::new(value, pos + digits))
///                                .map_err(|_| ExprError::new(ErrorKind::InvalidNumericLiteral))
///     }
/// }
///
/// assert_eq!(Integers.parse_literal("12+3", 0).unwrap(), Scanned::new(12, 2));
/// assert!(Integers.parse_literal("x", 0).is_err());
/// assert!(Integers.recognize_variable("x", 0).is_none());
/// ```
pub trait Recognizer<N> {
    /// Reads a numeric literal starting at `pos`.
    ///
    /// # Errors
    /// Must fail, typically with
    /// [`ErrorKind::InvalidNumericLiteral`](crate::error::ErrorKind::InvalidNumericLiteral),
    /// when no literal starts at `pos`. The tokenizer then tries functions and
    /// variables at the same position.
    fn parse_literal(&self, text: &str, pos: usize) -> ExprResult<Scanned<N>>;

    /// Discovers a variable name starting at `pos`.
    ///
    /// The name is `text[pos..end]`. When the registry does not know it, the
    /// tokenizer registers it with the returned placeholder value.
    fn recognize_variable(&self, _text: &str, _pos: usize) -> Option<Scanned<N>> {
        None
    }

    /// Discovers a function name starting at `pos`, with an implementation.
    ///
    /// The name is `text[pos..end]`. The tokenizer registers the function only
    /// if the open brace follows the name.
    fn recognize_function(&self, _text: &str, _pos: usize) -> Option<Scanned<Function<N>>> {
        None
    }
}
