//! Style programs and the postfix VM for bibtable.
//!
//! This crate provides:
//! - [`Instruction`] and [`read_instructions`] - Postfix instruction text
//! - [`StyleProgram`] - Declared fields, variables, functions, and the
//!   entry-type routine registry
//! - [`Vm`] - Stack-based interpreter with the builtin function table
//! - [`run_style`] - Formats resolved citations into per-entry fragments
//! - [`format_name`] and [`change_case`] - The name and case helpers behind
//!   `format.name$` and `change.case$`
//!
//! # Example
//!
//! ```
//! use bibtable_language::{StyleProgram, run_style};
//! use bibtable_parser::parse_database;
//!
//! let table = parse_database("@book{k, title = {Concrete Mathematics}}").unwrap();
//! let program = StyleProgram::new()
//!     .with_fields(["title"])
//!     .with_function_source("book", "title \"t\" change.case$ add.period$ write$")
//!     .unwrap();
//!
//! let output = run_style(&program, &table, &["k"]).unwrap();
//! assert_eq!(output.entries[0].text, "Concrete mathematics.");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod case;
mod instruction;
mod name_format;
mod program;
mod reader;
mod run;
mod value;
mod vm;

pub use case::{CaseMode, change_case};
pub use instruction::Instruction;
pub use name_format::format_name;
pub use program::{DEFAULT_TYPE_ROUTINE, StyleProgram};
pub use reader::read_instructions;
pub use run::{FormattedEntry, StyleOutput, run_style};
pub use value::{Callable, Value};
pub use vm::{BUILTIN_NAMES, Vm, is_builtin};
