//! End-to-end tests across every layer
//!
//! Tests the full run from database text to formatted output, and table
//! snapshots.

mod pipeline;
mod snapshots;
