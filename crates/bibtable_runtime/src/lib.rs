//! Pipeline, snapshots, and CLI for bibtable.
//!
//! This crate provides:
//! - [`RunConfig`] - Parser, crossref, and label settings for a run
//! - [`Pipeline`] - Parse, resolve citations, label, and format, in order
//! - [`snapshot`] - Entry table snapshots in `MessagePack`
//! - The `bibtable` command-line tool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod pipeline;
pub mod snapshot;

pub use config::RunConfig;
pub use pipeline::{Pipeline, PipelineOutput};
