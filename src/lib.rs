//! Bibtable - Bibliography database parser and style-program interpreter
//!
//! This crate re-exports all layers of the Bibtable system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: bibtable_runtime    - Pipeline, snapshots, CLI
//! Layer 2: bibtable_parser     - Scanner, database parser, writer
//!          bibtable_language   - Instruction reader, style programs, postfix VM
//! Layer 1: bibtable_storage    - Persons, entries, entry table, citations
//! Layer 0: bibtable_foundation - Errors, locations, brace-aware text utilities
//! ```

pub use bibtable_foundation as foundation;
pub use bibtable_language as language;
pub use bibtable_parser as parser;
pub use bibtable_runtime as runtime;
pub use bibtable_storage as storage;
