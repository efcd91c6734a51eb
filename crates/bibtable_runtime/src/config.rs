//! Configuration for a bibliography run.

use bibtable_parser::ParserConfig;
use bibtable_storage::LabelStyle;

/// Configuration for [`crate::Pipeline`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// How the database is parsed.
    pub parser: ParserConfig,

    /// How many citing entries pull a cross-referenced entry into the list.
    pub min_crossrefs: usize,

    /// How resolved entries are labelled.
    pub label_style: LabelStyle,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            min_crossrefs: 2,
            label_style: LabelStyle::Number,
        }
    }
}

impl RunConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the parser configuration.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Builder method to set the crossref threshold.
    #[must_use]
    pub fn with_min_crossrefs(mut self, min_crossrefs: usize) -> Self {
        self.min_crossrefs = min_crossrefs;
        self
    }

    /// Builder method to set the label style.
    #[must_use]
    pub fn with_label_style(mut self, label_style: LabelStyle) -> Self {
        self.label_style = label_style;
        self
    }
}
