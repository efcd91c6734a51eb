//! Macro tables for `@string` substitution.

use im::HashMap;

/// The month abbreviations every database starts with.
pub const MONTH_MACROS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

/// Macro names to replacement text.
///
/// Names are stored lowercase and looked up case-insensitively. The table is
/// persistent, so each parse takes a cheap copy of the configured defaults and
/// extends it without touching them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroTable {
    macros: HashMap<String, String>,
}

impl MacroTable {
    /// Creates a table with no macros, not even the months.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            macros: HashMap::new(),
        }
    }

    /// Creates a table holding the month abbreviations.
    #[must_use]
    pub fn with_months() -> Self {
        let mut table = Self::empty();
        for (name, value) in MONTH_MACROS {
            table.define(name, value);
        }
        table
    }

    /// Defines or overrides a macro.
    pub fn define(&mut self, name: &str, value: impl Into<String>) {
        self.macros.insert(name.to_lowercase(), value.into());
    }

    /// Looks up a macro by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.macros.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Returns true if the macro is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(&name.to_lowercase())
    }

    /// Number of macros defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Returns true if no macros are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

impl Default for MacroTable {
    fn default() -> Self {
        Self::with_months()
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for MacroTable {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut table = Self::empty();
        for (name, value) in iter {
            table.define(name.as_ref(), value);
        }
        table
    }
}
