//! Recursive descent parser for LispGen.
//!
//! Turns source text into [`Expr`] trees:
//!
//! ```text
//! (do (let ((x 1)))   ; comments run to end of line
//!     (+ x 2.5 "s" 'q))
//! ```
//!
//! - atoms are maximal runs of characters other than whitespace, `(`, `)`,
//!   `'`, `"`, `#` and `;`; a run of only digits and `.` is a number
//! - strings are double-quoted with `\"` as the only escape; an unterminated
//!   string yields what was read so far
//! - `'expr` wraps the following expression in `Expr::Quoted`
//! - lists and quotes together nest at most [`MAX_NESTING`] levels deep, so
//!   every accepted tree can be printed, compared and dropped on an ordinary
//!   thread stack

mod cursor;
mod error;

pub use error::{ParseError, ParseErrorKind};

use cursor::Cursor;
use lispgen_ir::Expr;
use lispgen_stack::ensure_sufficient_stack;
use tracing::trace;

/// Deepest nesting of lists and quotes the parser accepts.
pub const MAX_NESTING: usize = 1_000;

/// Parse exactly one expression.
///
/// Whitespace and comments may surround it; anything else after it is a
/// [`ParseErrorKind::TrailingContent`] error.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(source);
    let expr = parser.parse_required()?;
    parser.skip_trivia();
    if !parser.cursor.is_at_end() {
        let start = parser.cursor.position();
        return Err(ParseError::new(
            ParseErrorKind::TrailingContent,
            lispgen_ir::Span::from_range(start..source.len()),
        ));
    }
    Ok(expr)
}

/// Parse every top-level expression, in order.
pub fn parse_program(source: &str) -> Result<Vec<Expr>, ParseError> {
    let mut parser = Parser::new(source);
    let mut exprs = Vec::new();
    while let Some(expr) = parser.parse_expr()? {
        exprs.push(expr);
    }
    Ok(exprs)
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(source),
            depth: 0,
        }
    }

    /// Parse the next expression, or `None` once only trivia remains.
    pub fn parse_expr(&mut self) -> Result<Option<Expr>, ParseError> {
        self.skip_trivia();
        let Some(ch) = self.cursor.peek() else {
            return Ok(None);
        };

        let expr = match ch {
            '(' => self.nested(Self::parse_list)?,
            '\'' => self.nested(|parser| {
                parser.cursor.bump();
                Ok(Expr::quoted(parser.parse_required()?))
            })?,
            '"' => self.parse_string()?,
            ')' | '#' => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedChar(ch),
                    self.cursor.current_span(),
                ));
            }
            _ => self.parse_atom_or_number()?,
        };
        Ok(Some(expr))
    }

    /// Like [`Parser::parse_expr`], but running out of input is an error.
    fn parse_required(&mut self) -> Result<Expr, ParseError> {
        match self.parse_expr()? {
            Some(expr) => Ok(expr),
            None => Err(ParseError::new(
                ParseErrorKind::UnexpectedEof,
                self.cursor.current_span(),
            )),
        }
    }

    /// Run a production that opens one more level of nesting.
    fn nested(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep(MAX_NESTING),
                self.cursor.current_span(),
            ));
        }
        self.depth += 1;
        let expr = ensure_sufficient_stack(|| production(self));
        self.depth -= 1;
        expr
    }

    fn parse_list(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.position();
        self.cursor.bump();

        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.cursor.peek() {
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnclosedList,
                        self.cursor.span_from(start),
                    ));
                }
                Some(')') => {
                    self.cursor.bump();
                    break;
                }
                Some(_) => items.push(self.parse_required()?),
            }
        }

        trace!(len = items.len(), span = %self.cursor.span_from(start), "parsed list");
        Ok(Expr::list(items))
    }

    fn parse_string(&mut self) -> Result<Expr, ParseError> {
        self.cursor.bump();
        let mut text = String::new();
        while let Some(ch) = self.cursor.bump() {
            match ch {
                '"' => return Ok(Expr::str(&text)),
                '\\' => {
                    let escape_start = self.cursor.position() - 1;
                    match self.cursor.bump() {
                        Some('"') => text.push('"'),
                        Some(other) => {
                            return Err(ParseError::new(
                                ParseErrorKind::UnknownEscape(other),
                                self.cursor.span_from(escape_start),
                            ));
                        }
                        None => break,
                    }
                }
                _ => text.push(ch),
            }
        }
        // Unterminated: keep what was read.
        Ok(Expr::str(&text))
    }

    fn parse_atom_or_number(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.position();
        let word = self.cursor.eat_while(|ch| !is_delimiter(ch));

        if word.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
            let value = word.parse::<f32>().map_err(|_| {
                ParseError::new(
                    ParseErrorKind::InvalidNumber(word.to_string()),
                    self.cursor.span_from(start),
                )
            })?;
            trace!(value, "parsed number");
            return Ok(Expr::num(value));
        }

        trace!(atom = word, "parsed atom");
        Ok(Expr::atom(word))
    }

    /// Skip whitespace and `;` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_while(char::is_whitespace);
            if self.cursor.peek() == Some(';') {
                self.cursor.eat_while(|ch| ch != '\n');
            } else {
                break;
            }
        }
    }
}

/// Characters that end an atom.
fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '\'' | '"' | '#' | ';')
}

#[cfg(test)]
mod tests;
