//! Configuration for the database parser.

use crate::macros::MacroTable;

/// The fields whose values are person lists unless configured otherwise.
pub const DEFAULT_PERSON_FIELDS: [&str; 2] = ["author", "editor"];

/// Configuration for [`crate::DatabaseParser`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Macros defined before the first record is read.
    pub macros: MacroTable,

    /// Lowercase names of fields parsed as `" and "`-separated person lists.
    pub person_fields: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            macros: MacroTable::default(),
            person_fields: DEFAULT_PERSON_FIELDS.iter().map(|f| (*f).to_string()).collect(),
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to replace the default macros.
    #[must_use]
    pub fn with_macros(mut self, macros: MacroTable) -> Self {
        self.macros = macros;
        self
    }

    /// Builder method to add or override one default macro.
    #[must_use]
    pub fn with_macro(mut self, name: &str, value: impl Into<String>) -> Self {
        self.macros.define(name, value);
        self
    }

    /// Builder method to set the person-list fields.
    #[must_use]
    pub fn with_person_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.person_fields = fields
            .into_iter()
            .map(|f| f.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Returns true if `field` holds a person list.
    #[must_use]
    pub fn is_person_field(&self, field: &str) -> bool {
        self.person_fields
            .iter()
            .any(|f| f.eq_ignore_ascii_case(field))
    }
}
