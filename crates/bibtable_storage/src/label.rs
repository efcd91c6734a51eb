//! Sequence numbers and labels for resolved citations.

use std::collections::HashSet;

use bibtable_foundation::{Error, ErrorKind, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::table::EntryTable;

/// How entry labels are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LabelStyle {
    /// The 1-based position in the resolved citation order.
    #[default]
    Number,
    /// The citation key as first written.
    Key,
}

impl LabelStyle {
    /// Parses `number` or `key` (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "number" => Some(Self::Number),
            "key" => Some(Self::Key),
            _ => None,
        }
    }
}

impl EntryTable {
    /// Numbers and labels the entries for `keys`, in order.
    ///
    /// Keys without an entry are skipped and do not consume a number. The
    /// whole assignment is checked before any entry is touched.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyLabelled` if an entry was labelled by an earlier call or
    /// appears twice in `keys`.
    pub fn assign_labels<S: AsRef<str>>(&mut self, keys: &[S], style: LabelStyle) -> Result<()> {
        let mut seen = HashSet::new();
        let mut known = Vec::new();
        for key in keys {
            let key = key.as_ref();
            let Some(entry) = self.get(key) else {
                continue;
            };
            if entry.is_labelled() || !seen.insert(key.to_lowercase()) {
                let canonical = self.canonical_key(key).unwrap_or(key);
                return Err(Error::new(ErrorKind::AlreadyLabelled(canonical.to_string())));
            }
            known.push(key);
        }

        for (i, key) in known.into_iter().enumerate() {
            let number = i + 1;
            let label = match style {
                LabelStyle::Number => number.to_string(),
                LabelStyle::Key => self.canonical_key(key).unwrap_or(key).to_string(),
            };
            if let Some(entry) = self.get_mut(key) {
                entry.set_label(number, label);
            }
        }
        Ok(())
    }

    /// Character width of the widest assigned label.
    #[must_use]
    pub fn label_width(&self) -> usize {
        self.entries()
            .filter_map(|(_, e)| e.label())
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}
