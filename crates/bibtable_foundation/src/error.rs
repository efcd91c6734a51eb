//! Error types for the bibtable system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every kind belongs to one [`ErrorCategory`]; callers decide recovery by
//! category (syntax errors are recovered per record, everything else aborts
//! the operation that raised it).

use std::fmt;

use thiserror::Error;

use crate::span::Location;
use crate::types::ValueType;

/// Result type used throughout bibtable.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for bibtable operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto this error's context, creating it if needed.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates a "token required" syntax error.
    #[must_use]
    pub fn token_required(expected: impl Into<String>, location: Location) -> Self {
        Self::new(ErrorKind::TokenRequired {
            expected: expected.into(),
            location,
        })
    }

    /// Creates a premature end-of-input syntax error.
    #[must_use]
    pub fn premature_eof(location: Location) -> Self {
        Self::new(ErrorKind::PrematureEof { location })
    }

    /// Creates an unbalanced brace syntax error.
    #[must_use]
    pub fn unbalanced_brace(location: Location) -> Self {
        Self::new(ErrorKind::UnbalancedBrace { location })
    }

    /// Creates a duplicate citation key error.
    #[must_use]
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateKey(key.into()))
    }

    /// Creates an undefined macro error.
    #[must_use]
    pub fn undefined_macro(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedMacro(name.into()))
    }

    /// Creates an invalid name format error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidName(name.into()))
    }

    /// Creates a stack underflow error for the given operation.
    #[must_use]
    pub fn stack_underflow(op: impl Into<String>) -> Self {
        Self::new(ErrorKind::StackUnderflow { op: op.into() })
    }

    /// Creates a type mismatch error for the given operation.
    #[must_use]
    pub fn type_mismatch(op: impl Into<String>, expected: ValueType, actual: ValueType) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            op: op.into(),
            expected,
            actual,
        })
    }

    /// Creates an undefined symbol error.
    #[must_use]
    pub fn undefined_symbol(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedSymbol(name.into()))
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns the source location, for syntax errors.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.kind.location()
    }

    /// Renders this error for a human, including the source line and a caret
    /// when a location is known.
    #[must_use]
    pub fn render(&self) -> String {
        let message = self.kind.to_string();
        let mut rendered = match self.location() {
            Some(location) => location.render(&message),
            None => message,
        };
        if let Some(context) = &self.context {
            let context = context.to_string();
            if !context.is_empty() {
                rendered.push('\n');
                rendered.push_str(context.trim_end());
            }
        }
        rendered
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

/// Broad error classes, matching the recovery policy for each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Scanner or parser failures; recovered at record granularity.
    Syntax,
    /// Inconsistent database content.
    Data,
    /// Failures while running a style program; fatal to the run.
    Interpreter,
    /// Reading, writing, or (de)serializing failed.
    Io,
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErrorKind {
    /// None of the expected tokens matched at the current position.
    #[error("syntax error in line {}: {expected} expected", .location.line)]
    TokenRequired {
        /// Description of what was expected.
        expected: String,
        /// Where the token was required.
        location: Location,
    },

    /// Input ended while more was expected.
    #[error("syntax error in line {}: premature end of file", .location.line)]
    PrematureEof {
        /// Where input ended.
        location: Location,
    },

    /// A closing brace without a matching opening brace.
    #[error("syntax error in line {}: unbalanced brace", .location.line)]
    UnbalancedBrace {
        /// Where the stray brace was found.
        location: Location,
    },

    /// A citation key was inserted twice.
    #[error("repeated bibliography entry: {0}")]
    DuplicateKey(String),

    /// A field was given twice in one entry; the first value is kept.
    #[error("repeated field {field} in entry {key}")]
    RepeatedField {
        /// The entry's citation key.
        key: String,
        /// The repeated field name.
        field: String,
    },

    /// A value referenced a macro that was never defined.
    #[error("undefined macro: {0}")]
    UndefinedMacro(String),

    /// A personal name has more than three comma-separated parts.
    #[error("invalid name format: {0}")]
    InvalidName(String),

    /// An entry's crossref names a key that does not exist.
    #[error("entry {key} cross-references {crossref}, which is not in the database")]
    MissingCrossref {
        /// The referencing entry.
        key: String,
        /// The missing target.
        crossref: String,
    },

    /// A label was assigned to an entry that already has one.
    #[error("entry {0} has already been labelled")]
    AlreadyLabelled(String),

    /// An operation needed more values than the stack held.
    #[error("stack underflow in {op}")]
    StackUnderflow {
        /// The operation that underflowed.
        op: String,
    },

    /// An operand had the wrong type.
    #[error("{op}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The operation that rejected the operand.
        op: String,
        /// The expected type.
        expected: ValueType,
        /// The actual type encountered.
        actual: ValueType,
    },

    /// A name resolved to no variable, field, or function.
    #[error("undefined symbol: {0}")]
    UndefinedSymbol(String),

    /// `substring$` was called with a start position of zero.
    #[error("substring$: start position must not be zero")]
    SubstringStartZero,

    /// `call.type$` found no routine for the current entry's type.
    #[error("no formatting routine for entry type {0}")]
    NoTypeRoutine(String),

    /// An entry-level operation ran outside per-entry execution.
    #[error("{op} requires a current entry")]
    NoCurrentEntry {
        /// The operation that needed an entry.
        op: String,
    },

    /// `format.name$` selected a name that does not exist.
    #[error("name index {index} out of range ({count} names)")]
    NameIndexOutOfRange {
        /// The requested 1-based index.
        index: i64,
        /// The number of names available.
        count: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns the category of this error kind.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TokenRequired { .. } | Self::PrematureEof { .. } | Self::UnbalancedBrace { .. } => {
                ErrorCategory::Syntax
            }
            Self::DuplicateKey(_)
            | Self::RepeatedField { .. }
            | Self::UndefinedMacro(_)
            | Self::InvalidName(_)
            | Self::MissingCrossref { .. }
            | Self::AlreadyLabelled(_) => ErrorCategory::Data,
            Self::StackUnderflow { .. }
            | Self::TypeMismatch { .. }
            | Self::UndefinedSymbol(_)
            | Self::SubstringStartZero
            | Self::NoTypeRoutine(_)
            | Self::NoCurrentEntry { .. }
            | Self::NameIndexOutOfRange { .. }
            | Self::Internal(_) => ErrorCategory::Interpreter,
            Self::Io(_) | Self::Serialization(_) => ErrorCategory::Io,
        }
    }

    /// Returns the source location, for syntax errors.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::TokenRequired { location, .. }
            | Self::PrematureEof { location }
            | Self::UnbalancedBrace { location } => Some(location),
            _ => None,
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Stack of function/entry frames, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            writeln!(f, "at {source}")?;
        }
        for frame in &self.stack {
            writeln!(f, "  in {frame}")?;
        }
        Ok(())
    }
}
