//! Integration tests for Layer 2: Parser
//!
//! Tests for the scanner, database records, error recovery, and writing.

mod database;
mod round_trip;
