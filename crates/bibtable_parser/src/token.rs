//! Token types for the database scanner.
//!
//! A [`Pattern`] is one of the fixed token shapes of the record format; a
//! [`Token`] is a slice of the source that matched one.

use std::fmt;

use bibtable_foundation::Span;

/// The token shapes the scanner can look for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `@`
    At,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `"`
    Quote,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// `#`
    Hash,
    /// A record, field, or macro name.
    Name,
    /// A citation key.
    Key,
    /// A run of decimal digits.
    Number,
}

impl Pattern {
    /// Returns the byte length of the match at the start of `text`, if any.
    #[must_use]
    pub fn match_len(self, text: &str) -> Option<usize> {
        if let Some(literal) = self.literal() {
            return text.starts_with(literal).then_some(literal.len_utf8());
        }

        let mut chars = text.char_indices();
        let (_, first) = chars.next()?;
        let (first_ok, rest_ok): (fn(char) -> bool, fn(char) -> bool) = match self {
            Self::Name => (is_name_start, is_name_char),
            Self::Key => (is_key_char, is_key_char),
            Self::Number => (is_digit, is_digit),
            _ => return None,
        };
        if !first_ok(first) {
            return None;
        }
        let end = chars
            .find(|(_, c)| !rest_ok(*c))
            .map_or(text.len(), |(i, _)| i);
        Some(end)
    }

    /// Finds the first match in `text`, returning its byte range.
    #[must_use]
    pub fn search(self, text: &str) -> Option<(usize, usize)> {
        if let Some(literal) = self.literal() {
            return text.find(literal).map(|i| (i, i + literal.len_utf8()));
        }
        text.char_indices()
            .find_map(|(i, _)| self.match_len(&text[i..]).map(|len| (i, i + len)))
    }

    /// The character of a single-character pattern.
    #[must_use]
    pub const fn literal(self) -> Option<char> {
        match self {
            Self::At => Some('@'),
            Self::LBrace => Some('{'),
            Self::RBrace => Some('}'),
            Self::LParen => Some('('),
            Self::RParen => Some(')'),
            Self::Quote => Some('"'),
            Self::Comma => Some(','),
            Self::Equals => Some('='),
            Self::Hash => Some('#'),
            Self::Name | Self::Key | Self::Number => None,
        }
    }

    /// The closing delimiter paired with an opening one.
    #[must_use]
    pub const fn closer(self) -> Option<Self> {
        match self {
            Self::LBrace => Some(Self::RBrace),
            Self::LParen => Some(Self::RParen),
            _ => None,
        }
    }
}

/// Describes the pattern the way syntax errors name it.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal() {
            Some(c) => write!(f, "'{c}'"),
            None => match self {
                Self::Name => f.write_str("name"),
                Self::Key => f.write_str("citation key"),
                _ => f.write_str("number"),
            },
        }
    }
}

const NAME_SPECIALS: &str = "!$&*+-./:;<>?[]^_`|~\x7f";

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || NAME_SPECIALS.contains(c)
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

fn is_key_char(c: char) -> bool {
    !c.is_whitespace() && !",{}()\"=#".contains(c)
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// A token produced by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    /// The matched (or, for skips, the skipped-over) text.
    pub value: &'src str,
    /// The pattern that matched.
    pub pattern: Pattern,
    /// Where the value sits in the source.
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(value: &'src str, pattern: Pattern, span: Span) -> Self {
        Self {
            value,
            pattern,
            span,
        }
    }
}
