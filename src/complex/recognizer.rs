use crate::{
    complex::{
        lexer::{Lexeme, scan},
        number::I,
        value::Value,
    },
    engine::recognizer::{Recognizer, Scanned},
    error::{ErrorKind, ExprError, ExprResult},
};

/// Reads the literals of the complex configuration and discovers variables.
///
/// Literals are real numbers and the imaginary unit `i`. Any other identifier
/// is a variable, discovered with an [`Value::Unbound`] placeholder.
///
/// # Example
/// ```
/// use infixa::{
///     complex::{ComplexNumber, ComplexRecognizer, Value},
///     engine::recognizer::{Recognizer, Scanned},
/// };
///
/// let recognizer = ComplexRecognizer;
/// assert_eq!(recognizer.parse_literal("2i", 1).unwrap(),
///            Scanned::new(Value::from(ComplexNumber::new(0.0, 1.0)), 2));
/// assert_eq!(recognizer.recognize_variable("rate*2", 0),
///            Some(Scanned::new(Value::Unbound("rate".into()), 4)));
/// assert!(recognizer.recognize_variable("i", 0).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexRecognizer;

impl Recognizer<Value> for ComplexRecognizer {
    fn parse_literal(&self, text: &str, pos: usize) -> ExprResult<Scanned<Value>> {
        match scan(text, pos) {
            Some((Lexeme::Real(real), end)) => Ok(Scanned::new(Value::from(real), end)),
            Some((Lexeme::Imaginary, end)) => Ok(Scanned::new(Value::from(I), end)),
            _ => Err(ExprError::new(ErrorKind::InvalidNumericLiteral)),
        }
    }

    fn recognize_variable(&self, text: &str, pos: usize) -> Option<Scanned<Value>> {
        match scan(text, pos)? {
            (Lexeme::Identifier, end) => {
                Some(Scanned::new(Value::Unbound(text.get(pos..end)?.to_string()), end))
            },
            _ => None,
        }
    }
}
