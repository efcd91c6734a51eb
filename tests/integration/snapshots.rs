//! Snapshot tests: a saved table runs exactly like the parsed one

use bibtable::language::{StyleProgram, run_style};
use bibtable::parser::write_database;
use bibtable::runtime::{Pipeline, snapshot};
use bibtable::storage::LabelStyle;

const DATABASE: &str = r#"
    @preamble{"\hyphenation{data-base}"}
    @article{Lamport86, author = {Leslie Lamport}, title = {{\LaTeX}: A Document Preparation System},
             year = 1986, crossref = {manuals}}
    @manual{manuals, title = {Manuals}, organization = {Digital}}
"#;

fn style() -> StyleProgram {
    StyleProgram::new()
        .with_fields(["author", "title", "organization"])
        .with_function_source(
            "default.type",
            r#"author write$ " / " write$ organization write$ " / " write$ preamble$ write$"#,
        )
        .unwrap()
}

#[test]
fn snapshot_runs_like_the_source() {
    let pipeline = Pipeline::default();
    let (mut table, diagnostics) = pipeline.parse(DATABASE).unwrap();
    assert!(diagnostics.is_empty());
    table.assign_labels(&["lamport86"], LabelStyle::Key).unwrap();

    let restored = snapshot::from_bytes(&snapshot::to_bytes(&table).unwrap()).unwrap();
    assert_eq!(write_database(&restored), write_database(&table));

    let before = run_style(&style(), &table, &["LAMPORT86"]).unwrap();
    let after = run_style(&style(), &restored, &["LAMPORT86"]).unwrap();
    assert_eq!(before, after);
    assert_eq!(after.entries[0].label, "Lamport86");
    assert_eq!(
        after.entries[0].text,
        "Lamport, Leslie / Digital / \\hyphenation{data-base}"
    );
}

#[test]
fn snapshot_files_feed_the_pipeline() {
    let path = std::env::temp_dir().join("bibtable_integration_snapshot.msgpack");
    let (table, _) = Pipeline::default().parse(DATABASE).unwrap();
    snapshot::save_to_file(&table, &path).unwrap();

    let loaded = snapshot::load_from_file(&path).unwrap();
    let output = Pipeline::default()
        .run_table(loaded, Vec::new(), &style(), &["*"])
        .unwrap();
    assert_eq!(output.citations, ["Lamport86", "manuals"]);
    assert_eq!(output.style.entries.len(), 2);

    let _ = std::fs::remove_file(&path);
}
