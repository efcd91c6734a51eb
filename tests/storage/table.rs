//! Integration tests for the entry table and field lookup

use bibtable_foundation::ErrorKind;
use bibtable_storage::{Entry, EntryTable, LabelStyle, Person, lookup_field};

fn library() -> EntryTable {
    let mut table = EntryTable::new();
    table
        .insert(
            "Knuth84",
            Entry::new("InProceedings")
                .with_field("title", "Literate Programming")
                .with_field("crossref", "proc84")
                .with_person("author", Person::parse("Donald E. Knuth").unwrap()),
        )
        .unwrap();
    table
        .insert(
            "proc84",
            Entry::new("proceedings")
                .with_field("booktitle", "Proceedings of 1984")
                .with_field("year", "1984")
                .with_person("editor", Person::parse("Ada Lovelace").unwrap())
                .with_person("editor", Person::parse("Charles Babbage").unwrap()),
        )
        .unwrap();
    table
        .insert("dangling", Entry::new("misc").with_field("crossref", "nowhere"))
        .unwrap();
    table
}

// =============================================================================
// Keys
// =============================================================================

#[test]
fn keys_are_case_insensitive() {
    let table = library();
    assert!(table.contains("KNUTH84"));
    assert_eq!(table.canonical_key("knuth84"), Some("Knuth84"));
    assert_eq!(table.get("knuth84").unwrap().entry_type(), "inproceedings");
}

#[test]
fn duplicate_keys_keep_the_first_entry() {
    let mut table = library();
    let err = table
        .insert("KNUTH84", Entry::new("book").with_field("title", "Other"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateKey(_)));
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.get("knuth84").unwrap().field("title"),
        Some("Literate Programming")
    );
}

#[test]
fn insertion_order_is_kept() {
    let keys: Vec<_> = library().keys().map(str::to_string).collect();
    assert_eq!(keys, ["Knuth84", "proc84", "dangling"]);
}

#[test]
fn preamble_fragments_concatenate() {
    let mut table = EntryTable::new();
    table.add_to_preamble("\\def\\a{A}");
    table.add_to_preamble("\\def\\b{B}");
    assert_eq!(table.preamble_fragments().len(), 2);
    assert_eq!(table.preamble(), "\\def\\a{A}\\def\\b{B}");
}

// =============================================================================
// Lookup Order
// =============================================================================

#[test]
fn explicit_fields_first() {
    let table = library();
    assert_eq!(
        lookup_field(&table, "knuth84", "TITLE").unwrap().as_deref(),
        Some("Literate Programming")
    );
}

#[test]
fn persons_are_joined() {
    let table = library();
    assert_eq!(
        table.lookup_field("proc84", "editor").unwrap().as_deref(),
        Some("Lovelace, Ada and Babbage, Charles")
    );
}

#[test]
fn crossref_supplies_missing_fields() {
    let table = library();
    assert_eq!(
        table.lookup_field("knuth84", "year").unwrap().as_deref(),
        Some("1984")
    );
    assert_eq!(
        table.lookup_field("knuth84", "editor").unwrap().as_deref(),
        Some("Lovelace, Ada and Babbage, Charles")
    );
    assert_eq!(table.lookup_field("knuth84", "volume").unwrap(), None);
}

#[test]
fn unknown_keys_are_missing() {
    assert_eq!(library().lookup_field("nobody", "title").unwrap(), None);
}

#[test]
fn dangling_crossref_only_fails_on_fallthrough() {
    let table = library();
    assert_eq!(table.lookup_field("dangling", "crossref").unwrap().as_deref(), Some("nowhere"));
    let err = table.lookup_field("dangling", "title").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingCrossref { .. }));
}

// =============================================================================
// Labels
// =============================================================================

#[test]
fn labels_are_assigned_once() {
    let mut table = library();
    table
        .assign_labels(&["proc84", "ghost", "knuth84"], LabelStyle::Number)
        .unwrap();
    assert_eq!(table.get("proc84").unwrap().label(), Some("1"));
    assert_eq!(table.get("knuth84").unwrap().number(), Some(2));
    assert_eq!(table.get("dangling").unwrap().label(), None);

    let err = table.assign_labels(&["dangling", "Knuth84"], LabelStyle::Number).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyLabelled(ref key) if key == "Knuth84"));
    assert_eq!(table.get("dangling").unwrap().label(), None);
}

#[test]
fn key_labels_use_the_first_spelling() {
    let mut table = library();
    table.assign_labels(&["KNUTH84"], LabelStyle::Key).unwrap();
    assert_eq!(table.get("knuth84").unwrap().label(), Some("Knuth84"));
    assert_eq!(table.label_width(), 7);
}

#[test]
fn repeated_keys_cannot_be_labelled() {
    let mut table = library();
    let err = table
        .assign_labels(&["proc84", "PROC84"], LabelStyle::Number)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyLabelled(_)));
}
