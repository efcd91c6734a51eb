//! Running a style program over resolved citations.

use bibtable_foundation::Result;
use bibtable_storage::EntryTable;
use tracing::debug;

use crate::program::StyleProgram;
use crate::vm::Vm;

/// The formatted text of one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedEntry {
    /// Citation key as first written in the database.
    pub key: String,
    /// The entry's label.
    pub label: String,
    /// What the entry routine wrote for this entry.
    pub text: String,
}

/// Everything a style run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleOutput {
    /// Per-entry fragments, in citation order.
    pub entries: Vec<FormattedEntry>,
    /// The whole output buffer, including prologue and epilogue text.
    pub output: String,
    /// Warnings raised during the run.
    pub warnings: Vec<String>,
    /// Character width of the widest label.
    pub label_width: usize,
}

/// Runs `program` over the entries for `keys`, in order.
///
/// The prologue runs first and the epilogue last. Keys with no entry are
/// skipped with a warning. Entries without an assigned label are numbered in
/// the order they are formatted.
///
/// # Errors
///
/// Any interpreter error aborts the run. Errors raised while formatting an
/// entry carry an `entry KEY` frame.
pub fn run_style<S: AsRef<str>>(
    program: &StyleProgram,
    table: &EntryTable,
    keys: &[S],
) -> Result<StyleOutput> {
    let mut vm = Vm::new(program).with_table(table);
    let mut entries = Vec::with_capacity(keys.len());

    vm.run_prologue()?;
    for key in keys {
        let key = key.as_ref();
        let (Some(canonical), Some(entry)) = (table.canonical_key(key), table.get(key)) else {
            vm.warn(format!("I didn't find a database entry for \"{key}\""));
            continue;
        };

        let text = vm
            .format_entry(key)
            .map_err(|e| e.in_frame(format!("entry {canonical}")))?;
        debug!(key = canonical, bytes = text.len(), "formatted entry");

        let label = entry
            .label()
            .map_or_else(|| (entries.len() + 1).to_string(), str::to_string);
        entries.push(FormattedEntry {
            key: canonical.to_string(),
            label,
            text,
        });
    }
    vm.run_epilogue()?;

    let label_width = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);
    Ok(StyleOutput {
        entries,
        output: vm.take_output(),
        warnings: vm.take_warnings(),
        label_width,
    })
}
