//! Scanner and parser for bibliography databases.
//!
//! This crate provides:
//! - [`Scanner`] - Pattern-driven scanning with located syntax errors
//! - [`Pattern`] and [`Token`] - The token shapes of the record format
//! - [`MacroTable`] - `@string` macros, seeded with the month names
//! - [`DatabaseParser`] - Records to an [`bibtable_storage::EntryTable`],
//!   recovering from malformed records
//! - [`write_database`] - Writes a table back out as database text
//!
//! # Example
//!
//! ```
//! use bibtable_parser::parse_database;
//!
//! let table = parse_database(r#"
//!     @string{tug = "TeX Users Group"}
//!     @article{knuth84, author = "Donald E. Knuth", journal = tug # " Newsletter"}
//! "#).unwrap();
//!
//! let entry = table.get("knuth84").unwrap();
//! assert_eq!(entry.field("journal"), Some("TeX Users Group Newsletter"));
//! assert_eq!(entry.persons("author")[0].to_string(), "Knuth, Donald E.");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod macros;
mod parser;
mod scanner;
mod token;
mod writer;

pub use config::{DEFAULT_PERSON_FIELDS, ParserConfig};
pub use macros::{MONTH_MACROS, MacroTable};
pub use parser::{DatabaseParser, Record, parse_database};
pub use scanner::Scanner;
pub use token::{Pattern, Token};
pub use writer::write_database;
