//! Writes an [`EntryTable`] back out as database text.
//!
//! Every value is written braced. Stored values always have balanced braces,
//! so the output parses back to an equal table.

use std::fmt::Write as _;

use bibtable_storage::{Entry, EntryTable};

/// Renders `table` as database text: preamble fragments first, then every
/// entry in insertion order.
///
/// Persons are rendered as `von Last, Jr, First` and joined with `" and "`.
/// Macros are not written; their expansions already live in the values.
///
/// Person roles are written as ordinary fields, so the output reads back to
/// an equal table only under a [`ParserConfig`](crate::ParserConfig) with the
/// same `person_fields` as the one that built it.
#[must_use]
pub fn write_database(table: &EntryTable) -> String {
    let mut out = String::new();
    for fragment in table.preamble_fragments() {
        let _ = writeln!(out, "@preamble{{{{{fragment}}}}}\n");
    }
    for (key, entry) in table.entries() {
        write_entry(&mut out, key, entry);
        out.push('\n');
    }
    out
}

fn write_entry(out: &mut String, key: &str, entry: &Entry) {
    let _ = writeln!(out, "@{}{{{key},", entry.entry_type());
    for (role, persons) in entry.roles() {
        let names = persons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" and ");
        let _ = writeln!(out, "    {role} = {{{names}}},");
    }
    for (name, value) in entry.fields() {
        let _ = writeln!(out, "    {name} = {{{value}}},");
    }
    out.push_str("}\n");
}
