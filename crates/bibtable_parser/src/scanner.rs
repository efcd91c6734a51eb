//! Pattern-driven scanner over database text.
//!
//! The scanner has no fixed grammar of its own: callers name the patterns
//! acceptable at each point. [`Scanner::skip_to`] searches ahead,
//! [`Scanner::next_token`] matches in place, and [`Scanner::require`] turns a
//! failed match into a located syntax error.

use bibtable_foundation::{Error, Location, Result, Span};

use crate::token::{Pattern, Token};

/// Scanner state: the source, a byte position, and the current line.
pub struct Scanner<'src> {
    /// Source text being scanned.
    text: &'src str,
    /// Current byte offset.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Byte offset where the current line starts.
    line_start: usize,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner at the start of `text`.
    #[must_use]
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Current byte offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Current line number.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The whole source text.
    #[must_use]
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Returns true once every byte has been consumed.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The user-facing location of the current position.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::locate(self.text, self.pos)
    }

    /// Advances past everything up to and including the nearest match of any
    /// pattern.
    ///
    /// The match that ends first wins; on a tie the earlier pattern in
    /// `patterns` wins. The returned token covers all of the skipped text and
    /// the match. Returns `None`, without moving, if nothing matches.
    pub fn skip_to(&mut self, patterns: &[Pattern]) -> Option<Token<'src>> {
        let rest = &self.text[self.pos..];
        let mut winner: Option<(usize, Pattern)> = None;
        for &pattern in patterns {
            if let Some((_, end)) = pattern.search(rest) {
                if winner.is_none_or(|(best, _)| end < best) {
                    winner = Some((end, pattern));
                }
            }
        }

        let (end, pattern) = winner?;
        let span = self.span_to(self.pos + end);
        let value = &rest[..end];
        self.advance_to(self.pos + end);
        Some(Token::new(value, pattern, span))
    }

    /// Matches one of `patterns` at the current position, after whitespace.
    ///
    /// Returns `Ok(None)` if no pattern matches.
    ///
    /// # Errors
    ///
    /// Returns `PrematureEof` if only whitespace remains.
    pub fn next_token(&mut self, patterns: &[Pattern]) -> Result<Option<Token<'src>>> {
        self.eat_whitespace();
        if self.is_eof() {
            return Err(Error::premature_eof(self.location()));
        }

        let rest = &self.text[self.pos..];
        for &pattern in patterns {
            if let Some(len) = pattern.match_len(rest) {
                let span = self.span_to(self.pos + len);
                self.advance_to(self.pos + len);
                return Ok(Some(Token::new(&rest[..len], pattern, span)));
            }
        }
        Ok(None)
    }

    /// Like [`Scanner::next_token`], but a failed match is an error.
    ///
    /// # Errors
    ///
    /// Returns `TokenRequired` naming every acceptable pattern, or
    /// `PrematureEof` if input is exhausted.
    pub fn require(&mut self, patterns: &[Pattern]) -> Result<Token<'src>> {
        match self.next_token(patterns)? {
            Some(token) => Ok(token),
            None => {
                let expected = patterns
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ");
                Err(Error::token_required(expected, self.location()))
            }
        }
    }

    fn eat_whitespace(&mut self) {
        let rest = &self.text[self.pos..];
        let len = rest.len() - rest.trim_start().len();
        self.advance_to(self.pos + len);
    }

    fn span_to(&self, end: usize) -> Span {
        let column = self.text[self.line_start..self.pos].chars().count() + 1;
        Span::new(
            self.pos,
            end,
            self.line,
            u32::try_from(column).unwrap_or(u32::MAX),
        )
    }

    fn advance_to(&mut self, end: usize) {
        let skipped = &self.text[self.pos..end];
        for (i, c) in skipped.char_indices() {
            if c == '\n' {
                self.line += 1;
                self.line_start = self.pos + i + 1;
            }
        }
        self.pos = end;
    }
}
