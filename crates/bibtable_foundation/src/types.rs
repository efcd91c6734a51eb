//! Type descriptors for interpreter values.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The type of a value on the interpreter stack.
///
/// Used to report type mismatches without depending on the VM itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueType {
    /// Text value.
    String,
    /// 64-bit signed integer.
    Integer,
    /// Executable value (a named operation or an inline function body).
    Function,
    /// The missing-field marker.
    Missing,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Function => "function",
            Self::Missing => "missing field",
        };
        f.write_str(name)
    }
}
