//! Integration tests for writing databases back out

use bibtable_parser::{parse_database, write_database};

const DATABASE: &str = r#"
    @preamble{"\def\x{X}"}
    @string{cup = "Cambridge University Press"}
    @book{Concrete,
        author = {Ronald L. Graham and Donald E. Knuth and Oren Patashnik},
        title = {Concrete {M}athematics},
        publisher = cup,
        year = 1989,
    }
    @inproceedings{fontaine,
        author = {Jean de la Fontaine and Ford, Jr., Henry},
        title = "Fables",
        crossref = {Concrete},
    }
"#;

#[test]
fn written_databases_parse_back() {
    let table = parse_database(DATABASE).unwrap();
    let written = write_database(&table);
    let reparsed = parse_database(&written).unwrap();

    assert_eq!(write_database(&reparsed), written);
    assert_eq!(reparsed.preamble(), "\\def\\x{X}");
    for (key, entry) in table.entries() {
        assert_eq!(reparsed.get(key), Some(entry), "{key}");
    }
}

#[test]
fn macros_are_expanded_in_output() {
    let written = write_database(&parse_database(DATABASE).unwrap());
    assert!(written.contains("publisher = {Cambridge University Press}"));
    assert!(!written.contains("@string"));
}

#[test]
fn persons_are_written_in_canonical_form() {
    let written = write_database(&parse_database(DATABASE).unwrap());
    assert!(written.contains("author = {de la Fontaine, Jean and Ford, Jr., Henry},"));
}

#[test]
fn keys_keep_their_spelling() {
    let written = write_database(&parse_database(DATABASE).unwrap());
    assert!(written.contains("@book{Concrete,"));
}
