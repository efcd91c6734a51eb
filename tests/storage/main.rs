//! Integration tests for Layer 1: Storage
//!
//! Tests for personal names, the entry table, lookups, and citation resolution.

mod names;
mod table;
