//! Integration tests for Layer 3: Language
//!
//! Tests for the instruction reader, the builtin functions, and whole style
//! programs run over parsed databases.

mod programs;
