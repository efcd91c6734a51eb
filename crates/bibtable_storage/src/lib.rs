//! Entries, personal names, and the entry table for bibtable.
//!
//! This crate provides:
//! - [`Person`] - Structured personal names and the three-form name grammar
//! - [`Entry`] - One bibliographic record with fields and person lists
//! - [`EntryTable`] - Entries by citation key, plus the preamble
//! - [`lookup_field`] - Explicit, person, then crossref field lookup
//! - Citation resolution (wildcards, crossrefs) and one-time labelling

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod citation;
mod entry;
mod label;
mod lookup;
mod person;
mod table;

pub use citation::{WILDCARD, resolve_citations};
pub use entry::{CROSSREF_FIELD, Entry};
pub use label::LabelStyle;
pub use lookup::lookup_field;
pub use person::{NamePart, Person, parse_person_name};
pub use table::EntryTable;
