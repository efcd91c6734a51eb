//! Integration tests for database parsing and recovery

use bibtable_foundation::{ErrorCategory, ErrorKind};
use bibtable_parser::{DatabaseParser, ParserConfig, parse_database};

// =============================================================================
// Records
// =============================================================================

#[test]
fn entries_fields_and_persons() {
    let table = parse_database(
        r#"
        @Article{Knuth84,
            Author = "Donald E. Knuth and Leslie Lamport",
            title  = {Literate   {P}rogramming},
            year   = 1984,
        }
        "#,
    )
    .unwrap();

    let entry = table.get("knuth84").unwrap();
    assert_eq!(entry.entry_type(), "article");
    assert_eq!(entry.field("title"), Some("Literate {P}rogramming"));
    assert_eq!(entry.field("year"), Some("1984"));
    assert_eq!(entry.persons("author").len(), 2);
    assert_eq!(entry.persons("author")[1].to_string(), "Lamport, Leslie");
    assert_eq!(table.canonical_key("KNUTH84"), Some("Knuth84"));
}

#[test]
fn parenthesized_records() {
    let table = parse_database("@misc(note, title = {Parens})").unwrap();
    assert_eq!(table.get("note").unwrap().field("title"), Some("Parens"));
}

#[test]
fn macros_and_concatenation() {
    let table = parse_database(
        r#"
        @string{tug = "TeX Users Group"}
        @STRING(Ams = {American Mathematical Society})
        @book{a, publisher = tug # " and " # AMS, month = jan # "~1"}
        "#,
    )
    .unwrap();
    let entry = table.get("a").unwrap();
    assert_eq!(
        entry.field("publisher"),
        Some("TeX Users Group and American Mathematical Society")
    );
    assert_eq!(entry.field("month"), Some("January~1"));
}

#[test]
fn later_macros_override_earlier_ones() {
    let table = parse_database(
        r#"
        @string{pub = "One"}
        @book{a, publisher = pub}
        @string{pub = "Two"}
        @book{b, publisher = pub}
        "#,
    )
    .unwrap();
    assert_eq!(table.get("a").unwrap().field("publisher"), Some("One"));
    assert_eq!(table.get("b").unwrap().field("publisher"), Some("Two"));
}

#[test]
fn preambles_and_comments() {
    let table = parse_database(
        r#"
        Text outside records is ignored.
        @comment{this is not an entry}
        @preamble{"\newcommand{\noop}[1]{}"}
        @preamble{ {\def\x{X}} }
        "#,
    )
    .unwrap();
    assert!(table.is_empty());
    assert_eq!(
        table.preamble_fragments(),
        ["\\newcommand{\\noop}[1]{}", "\\def\\x{X}"]
    );
}

#[test]
fn quotes_inside_braces_do_not_terminate() {
    let table = parse_database(r#"@misc{q, title = "A {"}quoted{"} word"}"#).unwrap();
    assert_eq!(
        table.get("q").unwrap().field("title"),
        Some("A {\"}quoted{\"} word")
    );
}

#[test]
fn configured_person_fields() {
    let mut parser = DatabaseParser::new(ParserConfig::new().with_person_fields(["translator"]));
    let table = parser
        .parse("@book{t, translator = {A. Smith and B. Jones}, author = {C. Brown}}")
        .unwrap();
    let entry = table.get("t").unwrap();
    assert_eq!(entry.persons("translator").len(), 2);
    assert_eq!(entry.field("author"), Some("C. Brown"));
}

#[test]
fn configured_macros_are_predefined() {
    let mut parser = DatabaseParser::new(ParserConfig::new().with_macro("acm", "ACM Press"));
    let table = parser.parse("@book{x, publisher = acm, month = dec}").unwrap();
    let entry = table.get("x").unwrap();
    assert_eq!(entry.field("publisher"), Some("ACM Press"));
    assert_eq!(entry.field("month"), Some("December"));
}

// =============================================================================
// Recovery
// =============================================================================

#[test]
fn bad_records_are_skipped() {
    let mut parser = DatabaseParser::default();
    let table = parser
        .parse(
            r"
            @book{good1, title = {One}}
            @book{bad, title = undefinedmacro}
            @book{good2 title = {Two}}
            @book{good3, title = {Three}}
            ",
        )
        .unwrap();

    let keys: Vec<_> = table.keys().collect();
    assert_eq!(keys, ["good1", "good3"]);

    let diagnostics = parser.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(matches!(diagnostics[0].kind, ErrorKind::UndefinedMacro(_)));
    assert_eq!(diagnostics[1].category(), ErrorCategory::Syntax);
    assert_eq!(diagnostics[1].location().unwrap().line, 4);
}

#[test]
fn duplicate_keys_keep_the_first() {
    let mut parser = DatabaseParser::default();
    let table = parser
        .parse("@book{k, title = {First}} @book{K, title = {Second}}")
        .unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("k").unwrap().field("title"), Some("First"));
    assert!(matches!(parser.diagnostics()[0].kind, ErrorKind::DuplicateKey(_)));
}

#[test]
fn repeated_fields_keep_the_first() {
    let mut parser = DatabaseParser::default();
    let table = parser
        .parse("@book{k, title = {First}, TITLE = {Second}}")
        .unwrap();
    assert_eq!(table.get("k").unwrap().field("title"), Some("First"));
    let diagnostics = parser.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].to_string(), "repeated field title in entry k");
    assert!(parser.diagnostics().is_empty());
}

#[test]
fn unterminated_values_report_eof() {
    let mut parser = DatabaseParser::default();
    let table = parser.parse("@book{k, title = {Never closed").unwrap();
    assert!(table.is_empty());
    assert!(matches!(
        parser.diagnostics()[0].kind,
        ErrorKind::PrematureEof { .. }
    ));
}

#[test]
fn stray_closing_brace_in_quotes() {
    let mut parser = DatabaseParser::default();
    parser.parse(r#"@book{k, title = "oops}"}"#).unwrap();
    assert!(matches!(
        parser.diagnostics()[0].kind,
        ErrorKind::UnbalancedBrace { .. }
    ));
}

#[test]
fn each_parse_starts_fresh() {
    let mut parser = DatabaseParser::default();
    parser.parse("@book{k, title = nope}").unwrap();
    assert_eq!(parser.diagnostics().len(), 1);
    parser.parse("@book{k, title = {fine}}").unwrap();
    assert!(parser.diagnostics().is_empty());
}

#[test]
fn missing_file_is_io() {
    let err = DatabaseParser::default()
        .parse_file("/nonexistent/refs.bib")
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Io);
}
