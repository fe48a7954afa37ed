use std::mem;

use tracing::{debug, trace};

use crate::{
    engine::{
        parser::SyntaxConfig,
        recognizer::Recognizer,
        registry::{Arity, Fixity, Function, Registry, UnaryOperator},
        token::{Token, TokenKind},
    },
    error::{ErrorKind, ExprError, ExprResult},
};

/// The kind of token the tokenizer is looking for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    PrefixUnary,
    LiteralOrCallable,
    PostfixUnary,
    SeparatorOrClose,
    Operator,
}

/// Book-keeping for one open argument list.
#[derive(Debug)]
struct CallFrame {
    arity:       Arity,
    arguments:   usize,
    slot_filled: bool,
}

/// Checks that open and close braces pair up.
///
/// # Errors
/// [`ErrorKind::BracketMismatch`] at the first close brace without a partner,
/// or at the last character when braces are left open.
///
/// # Example
/// ```
/// use infixa::{
///     engine::{parser::SyntaxConfig, tokenizer::check_brackets},
///     error::ErrorKind,
/// };
///
/// let config = SyntaxConfig::default();
/// assert!(check_brackets("(1+(2))", &config).is_ok());
///
/// let err = check_brackets("1+2)", &config).unwrap_err();
/// assert_eq!((err.kind(), err.offset()), (&ErrorKind::BracketMismatch, Some(3)));
///
/// let err = check_brackets("(1+2", &config).unwrap_err();
/// assert_eq!(err.offset(), Some(3));
/// ```
pub fn check_brackets(text: &str, config: &SyntaxConfig) -> ExprResult<()> {
    let mut depth = 0_usize;

    for (offset, chr) in text.char_indices() {
        if chr == config.open_brace {
            depth += 1;
        } else if chr == config.close_brace {
            depth = depth.checked_sub(1)
                         .ok_or_else(|| ExprError::at(ErrorKind::BracketMismatch, offset))?;
        }
    }

    if depth > 0 {
        return Err(ExprError::at(ErrorKind::BracketMismatch, last_char_offset(text)));
    }
    Ok(())
}

/// Splits `text` into classified tokens.
///
/// Identifiers discovered by the recognizer are registered as a side effect,
/// so the registry may grow even when tokenization later fails.
///
/// # Errors
/// Any [`ErrorKind`] describing the first token that could not be
/// classified, pinned to the position where classification started.
/// [`ErrorKind::UnexpectedEndOfExpression`] at the last character when the
/// text ends where an operand is required, as in `-` or `1 +`.
pub fn tokenize<N, R>(text: &str,
                      config: &SyntaxConfig,
                      registry: &mut Registry<N>,
                      recognizer: &R)
                      -> ExprResult<Vec<Token<N>>>
    where N: Clone,
          R: Recognizer<N> + ?Sized
{
    Tokenizer { text,
                config,
                registry,
                recognizer,
                pos: 0,
                expected: Expected::PrefixUnary,
                pending_prefix: Vec::new(),
                operand: None,
                calls: Vec::new(),
                tokens: Vec::new() }.run()
}

struct Tokenizer<'a, N, R: ?Sized> {
    text:           &'a str,
    config:         &'a SyntaxConfig,
    registry:       &'a mut Registry<N>,
    recognizer:     &'a R,
    pos:            usize,
    expected:       Expected,
    /// Prefix operators read since the last operand.
    pending_prefix: Vec<UnaryOperator<N>>,
    /// The operand (or call close) still collecting postfix operators.
    operand:        Option<Token<N>>,
    calls:          Vec<CallFrame>,
    tokens:         Vec<Token<N>>,
}

impl<N, R> Tokenizer<'_, N, R>
    where N: Clone,
          R: Recognizer<N> + ?Sized
{
    fn run(mut self) -> ExprResult<Vec<Token<N>>> {
        loop {
            self.skip_whitespace();
            if self.pos >= self.text.len() {
                break;
            }

            let start = self.pos;
            trace!(offset = start, expected = ?self.expected, "tokenizer step");
            self.step().map_err(|e| e.or_offset(start))?;
        }

        if let Some(operand) = self.operand.take() {
            self.tokens.push(operand);
        }

        // The text stopped where an operand was still owed.
        if matches!(self.expected, Expected::PrefixUnary | Expected::LiteralOrCallable)
           || !self.pending_prefix.is_empty()
        {
            return Err(ExprError::at(ErrorKind::UnexpectedEndOfExpression,
                                     last_char_offset(self.text)));
        }

        if !self.calls.is_empty() {
            return Err(ExprError::at(ErrorKind::BracketMismatch, last_char_offset(self.text)));
        }

        Ok(self.tokens)
    }

    fn step(&mut self) -> ExprResult<()> {
        match self.expected {
            Expected::PrefixUnary => {
                if let Some(len) = self.match_unary(Fixity::Prefix) {
                    self.pos += len;
                } else {
                    self.expected = Expected::LiteralOrCallable;
                }
                Ok(())
            },
            Expected::LiteralOrCallable => self.literal_or_callable(),
            Expected::PostfixUnary => {
                if let Some(len) = self.match_unary(Fixity::Postfix) {
                    self.pos += len;
                } else {
                    if let Some(operand) = self.operand.take() {
                        self.tokens.push(operand);
                    }
                    self.expected = Expected::SeparatorOrClose;
                }
                Ok(())
            },
            Expected::SeparatorOrClose => self.separator_or_close(),
            Expected::Operator => self.operator(),
        }
    }

    /// Reads one unary operator into the pending lists; returns its length.
    fn match_unary(&mut self, fixity: Fixity) -> Option<usize> {
        let rest = &self.text[self.pos..];
        let (len, operator) = self.registry
                                  .unary_operators(fixity)
                                  .longest_match(rest)
                                  .map(|(key, operator)| (key.len(), operator.clone()))?;

        match fixity {
            Fixity::Prefix => self.pending_prefix.push(operator),
            Fixity::Postfix => match self.operand.as_mut() {
                Some(operand) => operand.postfix.push(operator),
                None => return None,
            },
        }
        Some(len)
    }

    fn literal_or_callable(&mut self) -> ExprResult<()> {
        let start = self.pos;

        match self.recognizer.parse_literal(self.text, start) {
            Ok(scanned) if scanned.end > start && self.text.is_char_boundary(scanned.end) => {
                self.begin_operand(TokenKind::Number(scanned.item), start);
                self.pos = scanned.end;
                return Ok(());
            },
            Ok(_) => trace!(offset = start, "recognizer returned an empty literal"),
            Err(e) => trace!(offset = start, error = %e, "no literal"),
        }

        if self.config.sigil != self.peek()
           && let Some((name, function, open_end)) = self.match_call()?
        {
            self.begin_call(name, function, start, open_end);
            return Ok(());
        }

        self.variable()
    }

    /// Finds a call at the current position: a function name followed by the
    /// open brace. Returns the name, the function and the offset just past
    /// the brace.
    fn match_call(&mut self) -> ExprResult<Option<(String, Function<N>, usize)>> {
        let text = self.text;
        let start = self.pos;
        let rest = &text[start..];

        if let Some((key, function)) = self.registry.functions().longest_match(rest)
           && let Some(open_end) = self.open_brace_after(start + key.len())
        {
            return Ok(Some((key.as_str().to_string(), function.clone(), open_end)));
        }

        if let Some(scanned) = self.recognizer.recognize_function(self.text, start)
           && scanned.end > start
           && let Some(name) = text.get(start..scanned.end)
           && let Some(open_end) = self.open_brace_after(scanned.end)
        {
            let name = name.to_string();
            debug!(name = %name, "registering discovered function");
            self.registry.add_function(&name, scanned.item.clone())?;
            return Ok(Some((name, scanned.item, open_end)));
        }

        Ok(None)
    }

    fn variable(&mut self) -> ExprResult<()> {
        let text = self.text;
        let start = self.pos;
        let name_start = match self.config.sigil {
            None => start,
            Some(sigil) if self.peek() == Some(sigil) => start + sigil.len_utf8(),
            Some(_) => return Err(self.nothing_recognized()),
        };

        let rest = &text[name_start..];
        let registered = self.registry
                             .variables()
                             .longest_match(rest)
                             .map_or(0, |(key, _)| key.len());
        let discovered =
            self.recognizer
                .recognize_variable(self.text, name_start)
                .filter(|scanned| scanned.end > name_start + registered)
                .and_then(|scanned| {
                    text.get(name_start..scanned.end)
                        .map(|name| (name.to_string(), scanned))
                });

        let name_end = if let Some((name, scanned)) = discovered {
            debug!(name = %name, "registering discovered variable");
            self.registry.set_variable(&name, scanned.item)?;
            scanned.end
        } else if registered > 0 {
            name_start + registered
        } else if self.config.sigil.is_some() {
            return Err(ExprError::new(ErrorKind::NoSuchVariable));
        } else {
            return Err(self.nothing_recognized());
        };

        let name = text[name_start..name_end].to_string();
        self.begin_operand(TokenKind::Variable(name), start);
        self.pos = name_end;
        Ok(())
    }

    fn separator_or_close(&mut self) -> ExprResult<()> {
        let start = self.pos;

        if self.peek() == Some(self.config.separator) {
            let frame = self.calls
                            .last_mut()
                            .ok_or_else(|| ExprError::new(ErrorKind::NoSuchToken))?;
            frame.arguments += 1;
            frame.slot_filled = false;

            self.tokens.push(Token::new(TokenKind::Separator, start));
            self.pos += self.config.separator.len_utf8();
            self.expected = Expected::PrefixUnary;
        } else if self.peek() == Some(self.config.close_brace) {
            let frame = self.calls
                            .pop()
                            .ok_or_else(|| ExprError::new(ErrorKind::BracketMismatch))?;

            if frame.arguments > 0 && !frame.slot_filled {
                return Err(ExprError::new(ErrorKind::UnexpectedEndOfExpression));
            }

            let arity = match frame.arity {
                Arity::Fixed(expected) if expected == frame.arguments => expected,
                Arity::Fixed(expected) => {
                    return Err(ExprError::new(ErrorKind::WrongArgumentCount { expected,
                                                                               actual:
                                                                                   frame.arguments, }));
                },
                Arity::Unbounded => frame.arguments,
            };

            self.operand = Some(Token::new(TokenKind::Close { arity }, start));
            self.pos += self.config.close_brace.len_utf8();
            self.expected = Expected::PostfixUnary;
        } else {
            self.expected = Expected::Operator;
        }
        Ok(())
    }

    fn operator(&mut self) -> ExprResult<()> {
        let start = self.pos;
        let rest = &self.text[start..];
        let (len, operator) = self.registry
                                  .operators()
                                  .longest_match(rest)
                                  .map(|(key, operator)| (key.len(), operator.clone()))
                                  .ok_or_else(|| ExprError::new(ErrorKind::NoSuchToken))?;

        self.tokens.push(Token::new(TokenKind::Operator(operator), start));
        self.pos += len;
        self.expected = Expected::PrefixUnary;
        Ok(())
    }

    /// Starts a literal or variable operand, taking the pending prefixes.
    fn begin_operand(&mut self, kind: TokenKind<N>, offset: usize) {
        self.mark_argument();

        let mut token = Token::new(kind, offset);
        token.prefix = mem::take(&mut self.pending_prefix);
        self.operand = Some(token);
        self.expected = Expected::PostfixUnary;
    }

    /// Emits a call token and opens its argument list.
    fn begin_call(&mut self, name: String, function: Function<N>, offset: usize, open_end: usize) {
        self.mark_argument();

        let arity = function.arity();
        let mut token = Token::new(TokenKind::Call { name, function }, offset);
        token.prefix = mem::take(&mut self.pending_prefix);
        self.tokens.push(token);

        self.calls.push(CallFrame { arity,
                                    arguments: 0,
                                    slot_filled: false });
        self.pos = open_end;
        self.expected = Expected::PrefixUnary;

        self.skip_whitespace();
        if self.peek() == Some(self.config.close_brace) {
            self.expected = Expected::SeparatorOrClose;
        }
    }

    /// Records that the innermost argument slot received an operand.
    fn mark_argument(&mut self) {
        if let Some(frame) = self.calls.last_mut() {
            if frame.arguments == 0 {
                frame.arguments = 1;
            }
            frame.slot_filled = true;
        }
    }

    /// Chooses the error for a position where no operand could be read.
    fn nothing_recognized(&self) -> ExprError {
        if self.calls.last().is_some_and(|frame| frame.arguments > 0) {
            return ExprError::new(ErrorKind::UnexpectedEndOfExpression);
        }
        if self.config.sigil.is_some() {
            return ExprError::new(ErrorKind::NoSuchToken);
        }

        let word: String = self.text[self.pos..].chars()
                                                 .take_while(|c| c.is_alphanumeric() || *c == '_')
                                                 .collect();
        if word.is_empty() {
            ExprError::new(ErrorKind::NoSuchToken)
        } else {
            ExprError::new(ErrorKind::NoSuchFunction(word))
        }
    }

    fn open_brace_after(&self, offset: usize) -> Option<usize> {
        let rest = self.text.get(offset..)?;
        let skipped = rest.len() - rest.trim_start().len();
        rest[skipped..].starts_with(self.config.open_brace)
                       .then(|| offset + skipped + self.config.open_brace.len_utf8())
    }

    fn skip_whitespace(&mut self) {
        while let Some(chr) = self.peek()
              && chr.is_whitespace()
        {
            self.pos += chr.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }
}

/// Byte offset of the last character, or zero for empty text.
fn last_char_offset(text: &str) -> usize {
    text.char_indices().last().map_or(0, |(offset, _)| offset)
}
