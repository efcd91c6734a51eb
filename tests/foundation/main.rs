//! Integration tests for Layer 0: Foundation
//!
//! Tests for errors, source locations, and brace-aware text utilities.

mod errors;
mod text;
