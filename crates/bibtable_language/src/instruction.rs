//! Style program instructions.

use std::fmt;
use std::sync::Arc;

/// One step of a style program.
///
/// Names are stored lowercase; the style language is case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Push a string literal (`"text"`).
    Str(Arc<str>),
    /// Push an integer literal (`#12`).
    Int(i64),
    /// Push a name as a function value without running it (`'name`).
    Quote(Arc<str>),
    /// Push an inline function (`{ ... }`).
    Block(Arc<[Instruction]>),
    /// Resolve a name: push a variable or field, or run a function.
    Call(Arc<str>),
}

impl Instruction {
    /// A string literal.
    #[must_use]
    pub fn str(text: &str) -> Self {
        Self::Str(text.into())
    }

    /// A quoted name.
    #[must_use]
    pub fn quote(name: &str) -> Self {
        Self::Quote(name.to_lowercase().into())
    }

    /// A name to resolve.
    #[must_use]
    pub fn call(name: &str) -> Self {
        Self::Call(name.to_lowercase().into())
    }

    /// An inline block.
    #[must_use]
    pub fn block(body: Vec<Instruction>) -> Self {
        Self::Block(body.into())
    }
}

/// Writes the instruction in the syntax [`crate::read_instructions`] reads.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Int(n) => write!(f, "#{n}"),
            Self::Quote(name) => write!(f, "'{name}"),
            Self::Call(name) => f.write_str(name),
            Self::Block(body) => {
                f.write_str("{")?;
                for instruction in body.iter() {
                    write!(f, " {instruction}")?;
                }
                f.write_str(" }")
            }
        }
    }
}
