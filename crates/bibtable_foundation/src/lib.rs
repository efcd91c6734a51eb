//! Core error types, source locations, and brace-aware text utilities for bibtable.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context, grouped by [`ErrorCategory`]
//! - [`Span`] and [`Location`] - Source positions and rendered diagnostics
//! - [`ValueType`] - Type descriptors for interpreter type errors
//! - [`text`] - Brace-aware splitting and whitespace helpers shared by the
//!   name parser and the database parser

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod span;
pub mod text;
mod types;

pub use error::{Error, ErrorCategory, ErrorContext, ErrorKind, Result};
pub use span::{Location, Span};
pub use types::ValueType;
