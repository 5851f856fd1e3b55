//! Character cursor over source text.
//!
//! Tracks a byte offset so every parsed element can report a [`Span`].

use lispgen_ir::Span;

pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    /// Current byte offset.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Consume and return the current character.
    #[inline]
    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume characters while `pred` holds, returning the consumed slice.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.source[start..self.pos]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span from `start` to the current position.
    pub(crate) fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos)
    }

    /// Span covering just the current character (empty at end of input).
    pub(crate) fn current_span(&self) -> Span {
        let len = self.peek().map_or(0, char::len_utf8);
        Span::from_range(self.pos..self.pos + len)
    }
}
