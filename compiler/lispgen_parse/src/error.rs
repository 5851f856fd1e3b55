//! Parse error types.

use lispgen_ir::Span;

/// What went wrong while reading source text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("list is missing its closing `)`")]
    UnclosedList,
    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),
    #[error("unknown escape sequence `\\{0}` in string")]
    UnknownEscape(char),
    #[error("unexpected input after the expression")]
    TrailingContent,
    #[error("expression nests deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// A parse failure and the source range it refers to.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }
}
