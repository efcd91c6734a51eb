//! Citation resolution: wildcard expansion and cross-reference discovery.

use std::collections::{HashMap, HashSet};

use crate::table::EntryTable;

/// The citation that stands for every entry in the table.
pub const WILDCARD: &str = "*";

impl EntryTable {
    /// Replaces the wildcard with every key in insertion order.
    ///
    /// Explicit citations keep their position; a key already seen (in any
    /// letter case) is never repeated.
    ///
    /// ```
    /// use bibtable_storage::{Entry, EntryTable};
    ///
    /// let mut table = EntryTable::new();
    /// for key in ["uno", "dos", "tres", "cuatro"] {
    ///     table.insert(key, Entry::new("misc")).unwrap();
    /// }
    /// assert_eq!(
    ///     table.expand_wildcard_citations(&["dos", "*"]),
    ///     vec!["dos", "uno", "tres", "cuatro"]
    /// );
    /// ```
    #[must_use]
    pub fn expand_wildcard_citations<S: AsRef<str>>(&self, citations: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut expanded = Vec::new();
        let mut push = |key: &str, expanded: &mut Vec<String>| {
            if seen.insert(key.to_lowercase()) {
                expanded.push(key.to_string());
            }
        };

        for citation in citations {
            let citation = citation.as_ref();
            if citation == WILDCARD {
                for key in self.keys() {
                    push(key, &mut expanded);
                }
            } else {
                push(citation, &mut expanded);
            }
        }
        expanded
    }

    /// Cross-referenced entries cited at least `min_crossrefs` times but never
    /// cited explicitly, in the order their count reached the threshold.
    ///
    /// Targets are reported with their canonical key when the table has one.
    /// Citations of unknown keys are ignored.
    #[must_use]
    pub fn crossreferenced_citations<S: AsRef<str>>(
        &self,
        citations: &[S],
        min_crossrefs: usize,
    ) -> Vec<String> {
        let cited: HashSet<String> = citations
            .iter()
            .map(|c| c.as_ref().to_lowercase())
            .collect();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut discovered = Vec::new();

        for citation in citations {
            let Some(crossref) = self.get(citation.as_ref()).and_then(|e| e.crossref()) else {
                continue;
            };
            let folded = crossref.to_lowercase();
            if cited.contains(&folded) {
                continue;
            }
            let count = counts.entry(folded).or_insert(0);
            *count += 1;
            if *count == min_crossrefs.max(1) {
                let key = self.canonical_key(crossref).unwrap_or(crossref);
                discovered.push(key.to_string());
            }
        }
        discovered
    }

    /// Expands wildcards, then appends cross-referenced entries discovered
    /// over the expanded list.
    #[must_use]
    pub fn resolve_citations<S: AsRef<str>>(&self, citations: &[S], min_crossrefs: usize) -> Vec<String> {
        let mut resolved = self.expand_wildcard_citations(citations);
        let crossrefs = self.crossreferenced_citations(&resolved, min_crossrefs);
        resolved.extend(crossrefs);
        resolved
    }
}

/// Resolves a citation list against `table`.
///
/// See [`EntryTable::resolve_citations`].
#[must_use]
pub fn resolve_citations<S: AsRef<str>>(
    table: &EntryTable,
    citations: &[S],
    min_crossrefs: usize,
) -> Vec<String> {
    table.resolve_citations(citations, min_crossrefs)
}
