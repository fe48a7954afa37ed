use logos::Logos;

/// A lexeme of the complex configuration, read one at a time at the position
/// the tokenizer asks about.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Lexeme {
    /// Real literals such as `42`, `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    Real(f64),
    /// The imaginary unit `i`. Longer identifiers starting with `i` are
    /// identifiers.
    #[token("i", priority = 3)]
    Imaginary,
    /// Variable or function names such as `x` or `sin`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
}

fn parse_real(lex: &logos::Lexer<Lexeme>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Reads the lexeme starting exactly at `pos`.
///
/// Returns the lexeme and the byte offset just past it, or `None` if nothing
/// recognizable starts there.
///
/// # Example
/// ```
/// use infixa::complex::lexer::{Lexeme, scan};
///
/// assert_eq!(scan("2*1.5e2", 2), Some((Lexeme::Real(150.0), 7)));
/// assert_eq!(scan("i", 0), Some((Lexeme::Imaginary, 1)));
/// assert_eq!(scan("3i", 1), Some((Lexeme::Imaginary, 2)));
/// assert_eq!(scan("x+in_2", 2), Some((Lexeme::Identifier, 6)));
/// assert_eq!(scan("+1", 0), None);
/// ```
#[must_use]
pub fn scan(text: &str, pos: usize) -> Option<(Lexeme, usize)> {
    let rest = text.get(pos..)?;
    let mut lexer = Lexeme::lexer(rest);
    let lexeme = lexer.next()?.ok()?;

    (lexer.span().start == 0).then(|| (lexeme, pos + lexer.span().end))
}
