//! Runtime values of the style VM.

use std::fmt;
use std::sync::Arc;

use bibtable_foundation::{Error, Result, ValueType};

use crate::instruction::Instruction;

/// Something executable: a function by name, or an anonymous body.
#[derive(Clone, Debug, PartialEq)]
pub enum Callable {
    /// A builtin or user function, resolved when executed.
    Named(Arc<str>),
    /// An inline `{ ... }` block.
    Body(Arc<[Instruction]>),
}

/// A value on the VM stack or in a variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A string.
    String(Arc<str>),
    /// An integer.
    Int(i64),
    /// An executable value, as pushed by a quote or a block.
    Function(Callable),
    /// A field the current entry does not have.
    Missing,
}

impl Value {
    /// The type of this value, for error messages.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Int(_) => ValueType::Integer,
            Self::Function(_) => ValueType::Function,
            Self::Missing => ValueType::Missing,
        }
    }

    /// Returns true for the missing-field marker.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The integer in this value.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` (attributed to `op`) for a non-integer.
    pub fn as_int(&self, op: &str) -> Result<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            other => Err(Error::type_mismatch(op, ValueType::Integer, other.value_type())),
        }
    }

    /// The text of this value; a missing field reads as the empty string.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` (attributed to `op`) for integers and functions.
    pub fn as_str(&self, op: &str) -> Result<&str> {
        match self {
            Self::String(s) => Ok(s),
            Self::Missing => Ok(""),
            other => Err(Error::type_mismatch(op, ValueType::String, other.value_type())),
        }
    }

    /// The callable in this value.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` (attributed to `op`) for non-functions.
    pub fn into_callable(self, op: &str) -> Result<Callable> {
        match self {
            Self::Function(callable) => Ok(callable),
            other => Err(Error::type_mismatch(op, ValueType::Function, other.value_type())),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Int(i64::from(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Int(n) => write!(f, "{n}"),
            Self::Function(Callable::Named(name)) => write!(f, "'{name}"),
            Self::Function(Callable::Body(body)) => {
                f.write_str("{")?;
                for instruction in body.iter() {
                    write!(f, " {instruction}")?;
                }
                f.write_str(" }")
            }
            Self::Missing => f.write_str("<missing>"),
        }
    }
}
