//! Source location tracking.
//!
//! `Span` tracks where a token matched in source text. `Location` is the
//! user-facing form: a line, a column, and a copy of the offending line so a
//! diagnostic can be rendered long after the source buffer is gone.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span of source text.
///
/// Tracks byte offsets and line/column positions for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset where this span starts.
    pub start: usize,
    /// Byte offset where this span ends (exclusive).
    pub end: usize,
    /// 1-based line number where this span starts.
    pub line: u32,
    /// 1-based column number where this span starts.
    pub column: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Returns the text this span covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// A resolved error position with the text of the surrounding line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in characters).
    pub column: u32,
    /// The full source line containing the position, without its line break.
    pub context: String,
}

impl Location {
    /// Creates a location from its parts.
    #[must_use]
    pub fn new(line: u32, column: u32, context: impl Into<String>) -> Self {
        Self {
            line,
            column,
            context: context.into(),
        }
    }

    /// Resolves a byte offset in `source` to a location.
    ///
    /// Offsets past the end are clamped to the end of input; offsets inside a
    /// multi-byte character are moved back to the character boundary.
    #[must_use]
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let before = &source[..offset];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[offset..]
            .find('\n')
            .map_or(source.len(), |i| offset + i);

        let line = u32::try_from(before.matches('\n').count() + 1).unwrap_or(u32::MAX);
        let column =
            u32::try_from(source[line_start..offset].chars().count() + 1).unwrap_or(u32::MAX);
        let context = source[line_start..line_end].trim_end_matches('\r');

        Self::new(line, column, context)
    }

    /// Returns the caret line pointing at this location's column.
    #[must_use]
    pub fn marker(&self) -> String {
        let indent = self.column.saturating_sub(1) as usize;
        format!("{}^", " ".repeat(indent))
    }

    /// Renders a three-line diagnostic: the message, the source line, and a caret.
    #[must_use]
    pub fn render(&self, message: &str) -> String {
        format!("{message}\n{}\n{}", self.context, self.marker())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
