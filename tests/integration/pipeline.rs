//! End-to-end pipeline tests

use bibtable::language::{StyleProgram, read_instructions};
use bibtable::runtime::{Pipeline, RunConfig};
use bibtable::storage::LabelStyle;

const DATABASE: &str = r#"
    @string{aw = "Addison-Wesley"}
    @incollection{ch1, author = {Ada Lovelace}, title = {Notes on the Engine}, crossref = {volume}}
    @incollection{ch2, author = {Charles Babbage}, title = {Passages}, crossref = {volume}}
    @book{volume, editor = {Alan Turing}, title = {Collected Papers}, publisher = aw, year = 1950}
    @book{solo, author = {Grace Hopper}, title = {Compilers}, publisher = aw, year = 1952}
    @misc{broken title = {no comma}}
"#;

fn style() -> StyleProgram {
    StyleProgram::new()
        .with_fields(["author", "editor", "title", "publisher", "year"])
        .with_entry_strings(["who"])
        .with_function_source(
            "default.type",
            r#"
            author empty$ { editor } { author } if$ 'who :=
            "[" write$ cite$ write$ "] " write$
            who #1 "{ll}" format.name$ write$ ": " write$
            title write$ " (" write$ publisher write$ ", " write$ year write$ ")" write$
            newline$
            "#,
        )
        .unwrap()
        .with_epilogue(read_instructions("\"end\" write$").unwrap())
}

#[test]
fn full_run_over_a_database() {
    let output = Pipeline::default()
        .run(DATABASE, &style(), &["ch1", "ch2"])
        .unwrap();

    assert_eq!(output.citations, ["ch1", "ch2", "volume"]);
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.style.output,
        "[ch1] Lovelace: Notes on the Engine (Addison-Wesley, 1950)\n\
         [ch2] Babbage: Passages (Addison-Wesley, 1950)\n\
         [volume] Turing: Collected Papers (Addison-Wesley, 1950)\n\
         end"
    );
}

#[test]
fn wildcard_with_key_labels() {
    let pipeline = Pipeline::new(RunConfig::new().with_label_style(LabelStyle::Key));
    let output = pipeline.run(DATABASE, &style(), &["solo", "*"]).unwrap();

    assert_eq!(output.citations, ["solo", "ch1", "ch2", "volume"]);
    let labels: Vec<_> = output.style.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["solo", "ch1", "ch2", "volume"]);
    assert_eq!(output.style.label_width, 6);
}

#[test]
fn single_crossref_below_threshold() {
    let output = Pipeline::default().run(DATABASE, &style(), &["ch1"]).unwrap();
    assert_eq!(output.citations, ["ch1"]);
    assert_eq!(output.table.get("volume").unwrap().label(), None);

    let eager = Pipeline::new(RunConfig::new().with_min_crossrefs(1));
    let output = eager.run(DATABASE, &style(), &["ch1"]).unwrap();
    assert_eq!(output.citations, ["ch1", "volume"]);
}

#[test]
fn database_files() {
    let path = std::env::temp_dir().join("bibtable_pipeline_test.bib");
    std::fs::write(&path, DATABASE).unwrap();

    let output = Pipeline::default().run_file(&path, &style(), &["solo"]).unwrap();
    assert_eq!(
        output.style.entries[0].text,
        "[solo] Hopper: Compilers (Addison-Wesley, 1952)\n"
    );

    let _ = std::fs::remove_file(&path);
}
