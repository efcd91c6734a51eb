//! Layered field lookup.
//!
//! A field is resolved in a fixed order:
//!
//! 1. the entry's explicit field;
//! 2. the entry's persons for a role of that name, joined with `" and "`;
//! 3. the same lookup on the entry named by `crossref`, if any;
//! 4. otherwise the field is missing (`Ok(None)`), which is not an error.
//!
//! Crossrefs are followed lazily, so a dangling crossref only surfaces when a
//! lookup actually falls through to it.

use std::borrow::Cow;
use std::collections::HashSet;

use bibtable_foundation::{Error, ErrorKind, Result};

use crate::table::EntryTable;

/// Looks up `field` on the entry stored under `key`.
///
/// Returns `Ok(None)` when the key is unknown or the field is missing.
///
/// # Errors
///
/// Returns `MissingCrossref` if the lookup falls through to a crossref that
/// names a key absent from the table.
pub fn lookup_field<'t>(table: &'t EntryTable, key: &str, field: &str) -> Result<Option<Cow<'t, str>>> {
    let field = field.to_lowercase();
    let mut visited = HashSet::new();
    let mut current = key.to_string();

    loop {
        let Some(entry) = table.get(&current) else {
            return Ok(None);
        };
        if let Some(value) = entry.field(&field) {
            return Ok(Some(Cow::Borrowed(value)));
        }
        if let Some(rendered) = entry.render_persons(&field) {
            return Ok(Some(Cow::Owned(rendered)));
        }
        let Some(target) = entry.crossref() else {
            return Ok(None);
        };
        if !table.contains(target) {
            return Err(Error::new(ErrorKind::MissingCrossref {
                key: current,
                crossref: target.to_string(),
            }));
        }
        if !visited.insert(current.to_lowercase()) || visited.contains(&target.to_lowercase()) {
            // A crossref cycle; nothing further can supply the field.
            return Ok(None);
        }
        current = target.to_string();
    }
}

impl EntryTable {
    /// Looks up a field with person and crossref fallback.
    ///
    /// See [`lookup_field`].
    ///
    /// # Errors
    ///
    /// Returns `MissingCrossref` for a dangling crossref on the lookup path.
    pub fn lookup_field(&self, key: &str, field: &str) -> Result<Option<Cow<'_, str>>> {
        lookup_field(self, key, field)
    }
}
