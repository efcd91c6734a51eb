//! The parsed database: entries by citation key, plus preamble fragments.

use std::collections::HashMap;

use bibtable_foundation::{Error, Result};

use crate::entry::Entry;

/// Entries keyed by citation key, in insertion order.
///
/// Keys are unique case-insensitively; the table remembers each key as it
/// was first written and answers lookups regardless of case.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "serde_support::TableData", into = "serde_support::TableData")
)]
pub struct EntryTable {
    entries: Vec<(String, Entry)>,
    index: HashMap<String, usize>,
    preamble: Vec<String>,
}

impl EntryTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the key is already present; the table is
    /// left unchanged and the first entry is retained.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) -> Result<()> {
        let key = key.into();
        let folded = key.to_lowercase();
        if self.index.contains_key(&folded) {
            return Err(Error::duplicate_key(key));
        }
        self.index.insert(folded, self.entries.len());
        self.entries.push((key, entry));
        Ok(())
    }

    /// Returns the entry for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.position(key).map(|i| &mut self.entries[i].1)
    }

    /// Returns true if an entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the key as it was first written, for any spelling of it.
    #[must_use]
    pub fn canonical_key(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].0.as_str())
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over `(key, entry)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a preamble fragment.
    pub fn add_to_preamble(&mut self, fragment: impl Into<String>) {
        self.preamble.push(fragment.into());
    }

    /// The preamble fragments in the order they were read.
    #[must_use]
    pub fn preamble_fragments(&self) -> &[String] {
        &self.preamble
    }

    /// The preamble fragments concatenated.
    #[must_use]
    pub fn preamble(&self) -> String {
        self.preamble.concat()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.index.get(&key.to_lowercase()).copied()
    }
}

/// Tables compare by content: the same entries in the same order, and the
/// same preamble.
impl PartialEq for EntryTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.preamble == other.preamble
    }
}

impl Eq for EntryTable {}

#[cfg(feature = "serde")]
mod serde_support {
    use serde::{Deserialize, Serialize};

    use super::EntryTable;
    use crate::entry::Entry;

    /// Wire form of a table; the case-folded index is rebuilt on load.
    #[derive(Serialize, Deserialize)]
    pub(super) struct TableData {
        entries: Vec<(String, Entry)>,
        preamble: Vec<String>,
    }

    impl From<EntryTable> for TableData {
        fn from(table: EntryTable) -> Self {
            Self {
                entries: table.entries,
                preamble: table.preamble,
            }
        }
    }

    impl From<TableData> for EntryTable {
        fn from(data: TableData) -> Self {
            let index = data
                .entries
                .iter()
                .enumerate()
                .map(|(i, (key, _))| (key.to_lowercase(), i))
                .collect();
            Self {
                entries: data.entries,
                index,
                preamble: data.preamble,
            }
        }
    }
}
