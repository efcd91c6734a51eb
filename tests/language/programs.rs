//! Integration tests for whole style programs over parsed databases

use bibtable_foundation::ErrorKind;
use bibtable_language::{StyleProgram, read_instructions, run_style};
use bibtable_parser::parse_database;
use bibtable_storage::{EntryTable, LabelStyle};

const DATABASE: &str = r#"
    @preamble{"\def\noop#1{}"}
    @article{knuth84,
        author = {Donald E. Knuth},
        title = {Literate Programming},
        journal = {The Computer Journal},
        year = 1984,
    }
    @book{gkp,
        author = {Ronald L. Graham and Donald E. Knuth and Oren Patashnik},
        title = {Concrete Mathematics},
        publisher = {Addison-Wesley},
        year = 1989,
    }
    @misc{anon, title = {Untitled Notes}}
"#;

fn database() -> EntryTable {
    parse_database(DATABASE).unwrap()
}

/// A small author-year style.
fn style() -> StyleProgram {
    StyleProgram::new()
        .with_fields(["author", "title", "journal", "publisher", "year"])
        .with_global_integers(["count"])
        .with_function_source(
            "format.authors",
            r#"
            author empty$
                { "" }
                { author #1 "{vv~}{ll}{, f.}" format.name$
                  author num.names$ #1 >
                      { " et al." * }
                      'skip$
                  if$ }
            if$
            "#,
        )
        .unwrap()
        .with_function_source(
            "author.block",
            r#"format.authors duplicate$ empty$ { pop$ } { add.period$ " " * write$ } if$"#,
        )
        .unwrap()
        .with_function_source(
            "article",
            r#"
            author.block
            title "t" change.case$ add.period$ write$ " " write$
            journal ", " * year * add.period$ write$
            "#,
        )
        .unwrap()
        .with_function_source(
            "book",
            r#"
            author.block
            title "t" change.case$ add.period$ write$ " " write$
            publisher ", " * year * add.period$ write$
            "#,
        )
        .unwrap()
        .with_function_source(
            "default.type",
            r#"
            author.block title add.period$ write$
            year missing$ { "no year in " cite$ * warning$ } 'skip$ if$
            "#,
        )
        .unwrap()
        .with_entry_routine(read_instructions("call.type$ newline$ count #1 + 'count :=").unwrap())
        .with_prologue(
            read_instructions("preamble$ empty$ 'skip$ { preamble$ write$ newline$ } if$").unwrap(),
        )
        .with_epilogue(read_instructions(r#""total: " count int.to.str$ * write$"#).unwrap())
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn entries_dispatch_on_type() {
    let output = run_style(&style(), &database(), &["knuth84", "gkp", "anon"]).unwrap();
    let texts: Vec<_> = output.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Knuth, D.~E. Literate programming. The Computer Journal, 1984.\n",
            "Graham, R.~L. et al. Concrete mathematics. Addison-Wesley, 1989.\n",
            "Untitled Notes.\n",
        ]
    );
}

#[test]
fn prologue_and_epilogue_frame_the_output() {
    let output = run_style(&style(), &database(), &["gkp", "anon"]).unwrap();
    assert!(output.output.starts_with("\\def\\noop#1{}\n"));
    assert!(output.output.ends_with("total: 2"));
}

#[test]
fn style_warnings_are_reported() {
    let output = run_style(&style(), &database(), &["anon"]).unwrap();
    assert_eq!(output.warnings, ["no year in anon"]);
}

#[test]
fn unknown_citations_are_skipped() {
    let output = run_style(&style(), &database(), &["ghost", "knuth84"]).unwrap();
    assert_eq!(output.entries.len(), 1);
    assert_eq!(output.entries[0].label, "1");
    assert!(output.output.ends_with("total: 1"));
    assert_eq!(
        output.warnings,
        ["I didn't find a database entry for \"ghost\""]
    );
}

#[test]
fn assigned_labels_are_used() {
    let mut table = database();
    table.assign_labels(&["gkp", "knuth84"], LabelStyle::Key).unwrap();
    let output = run_style(&style(), &table, &["gkp", "knuth84"]).unwrap();
    let labels: Vec<_> = output.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["gkp", "knuth84"]);
    assert_eq!(output.label_width, 7);
}

#[test]
fn crossrefs_supply_fields() {
    let table = parse_database(
        r"
        @inproceedings{talk, title = {A Talk}, crossref = {conf}}
        @proceedings{conf, booktitle = {Proceedings of the Conference}, year = 2001}
        ",
    )
    .unwrap();
    let program = StyleProgram::new()
        .with_fields(["title", "booktitle", "year"])
        .with_function_source(
            "inproceedings",
            r#"title write$ ". In " write$ booktitle write$ ", " write$ year write$"#,
        )
        .unwrap();
    let output = run_style(&program, &table, &["talk"]).unwrap();
    assert_eq!(
        output.entries[0].text,
        "A Talk. In Proceedings of the Conference, 2001"
    );
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn errors_carry_function_and_entry_frames() {
    let program = StyleProgram::new()
        .with_function_source("helper", "pop$")
        .unwrap()
        .with_function_source("book", "helper")
        .unwrap();
    let err = run_style(&program, &database(), &["gkp"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StackUnderflow { .. }));
    assert_eq!(
        err.context.map(|c| c.stack).unwrap_or_default(),
        ["function helper", "function book", "entry gkp"]
    );
}

#[test]
fn undeclared_fields_are_undefined() {
    let program = StyleProgram::new()
        .with_function_source("default.type", "publisher write$")
        .unwrap();
    let err = run_style(&program, &database(), &["gkp"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UndefinedSymbol(ref name) if name == "publisher"));
}

#[test]
fn types_without_a_routine() {
    let program = StyleProgram::new()
        .with_function_source("book", "skip$")
        .unwrap();
    let err = run_style(&program, &database(), &["anon"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoTypeRoutine(ref t) if t == "misc"));
}
