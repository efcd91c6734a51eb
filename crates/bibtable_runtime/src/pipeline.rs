//! The end-to-end run: parse, resolve citations, label, and format.
//!
//! Each phase runs to completion before the next starts. Crossref counting
//! needs every citation, and labels need the final citation order.

use std::path::Path;

use bibtable_foundation::{Error, ErrorContext, Result};
use bibtable_language::{StyleOutput, StyleProgram, run_style};
use bibtable_parser::DatabaseParser;
use bibtable_storage::EntryTable;
use tracing::{info, info_span};

use crate::config::RunConfig;

/// Everything one run produced.
#[derive(Debug)]
pub struct PipelineOutput {
    /// The parsed table, with labels assigned.
    pub table: EntryTable,
    /// Resolved citation keys, in formatting order.
    pub citations: Vec<String>,
    /// What the style program produced.
    pub style: StyleOutput,
    /// Records skipped while parsing.
    pub diagnostics: Vec<Error>,
}

/// Runs databases through a style program.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: RunConfig,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Parses database text, returning the table and the skipped records.
    ///
    /// # Errors
    ///
    /// Parsing in-memory text does not fail; the signature matches
    /// [`Pipeline::parse_file`].
    pub fn parse(&self, text: &str) -> Result<(EntryTable, Vec<Error>)> {
        let _span = info_span!("parse", bytes = text.len()).entered();
        let mut parser = DatabaseParser::new(self.config.parser.clone());
        let table = parser.parse(text)?;
        let diagnostics = parser.take_diagnostics();
        info!(
            entries = table.len(),
            skipped = diagnostics.len(),
            "parsed database"
        );
        Ok((table, diagnostics))
    }

    /// Parses a database file.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(EntryTable, Vec<Error>)> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e).with_context(ErrorContext::new().with_source(path.display().to_string()))
        })?;
        self.parse(&text)
    }

    /// Expands wildcards and adds crossref targets cited often enough.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, table: &EntryTable, citations: &[S]) -> Vec<String> {
        let _span = info_span!("resolve", citations = citations.len()).entered();
        let resolved = table.resolve_citations(citations, self.config.min_crossrefs);
        info!(resolved = resolved.len(), "resolved citations");
        resolved
    }

    /// Runs every phase over `text`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyLabelled` if a citation repeats after resolution, or
    /// the first interpreter error.
    pub fn run<S: AsRef<str>>(
        &self,
        text: &str,
        program: &StyleProgram,
        citations: &[S],
    ) -> Result<PipelineOutput> {
        let (table, diagnostics) = self.parse(text)?;
        self.run_table(table, diagnostics, program, citations)
    }

    /// Runs every phase over a database file.
    ///
    /// # Errors
    ///
    /// As [`Pipeline::run`], plus `Io` errors reading the file.
    pub fn run_file<S: AsRef<str>>(
        &self,
        path: impl AsRef<Path>,
        program: &StyleProgram,
        citations: &[S],
    ) -> Result<PipelineOutput> {
        let (table, diagnostics) = self.parse_file(path)?;
        self.run_table(table, diagnostics, program, citations)
    }

    /// Resolves, labels, and formats an already parsed table.
    ///
    /// # Errors
    ///
    /// As [`Pipeline::run`].
    pub fn run_table<S: AsRef<str>>(
        &self,
        mut table: EntryTable,
        diagnostics: Vec<Error>,
        program: &StyleProgram,
        citations: &[S],
    ) -> Result<PipelineOutput> {
        let citations = self.resolve(&table, citations);

        {
            let _span = info_span!("label", style = ?self.config.label_style).entered();
            table.assign_labels(&citations, self.config.label_style)?;
        }

        let style = {
            let _span = info_span!("format", entries = citations.len()).entered();
            let style = run_style(program, &table, &citations)?;
            info!(
                fragments = style.entries.len(),
                warnings = style.warnings.len(),
                "formatted entries"
            );
            style
        };

        Ok(PipelineOutput {
            table,
            citations,
            style,
            diagnostics,
        })
    }
}
