//! Integration tests for the personal name grammar

use bibtable_foundation::ErrorKind;
use bibtable_storage::{NamePart, Person, parse_person_name};

fn part(person: &Person, part: NamePart) -> String {
    person.part(part).join(" ")
}

fn parts(name: &str) -> [String; 5] {
    let person = Person::parse(name).unwrap();
    [
        part(&person, NamePart::First),
        part(&person, NamePart::Middle),
        part(&person, NamePart::Prelast),
        part(&person, NamePart::Last),
        part(&person, NamePart::Lineage),
    ]
}

// =============================================================================
// The Three Forms
// =============================================================================

#[test]
fn first_von_last() {
    assert_eq!(parts("Jean de la Fontaine"), ["Jean", "", "de la", "Fontaine", ""]);
    assert_eq!(parts("Ludwig van Beethoven"), ["Ludwig", "", "van", "Beethoven", ""]);
    assert_eq!(parts("Avinash K. Dixit"), ["Avinash", "K.", "", "Dixit", ""]);
}

#[test]
fn von_last_first() {
    assert_eq!(parts("de la Fontaine, Jean"), ["Jean", "", "de la", "Fontaine", ""]);
    assert_eq!(parts("Dixit, Avinash K."), ["Avinash", "K.", "", "Dixit", ""]);
}

#[test]
fn von_last_jr_first() {
    assert_eq!(parts("Ford, Jr., Henry"), ["Henry", "", "", "Ford", "Jr."]);
    assert_eq!(
        parts("van Beethoven, III, Ludwig"),
        ["Ludwig", "", "van", "Beethoven", "III"]
    );
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn braced_words_are_atomic() {
    assert_eq!(parts("{Barnes and Noble}"), ["", "", "", "{Barnes and Noble}", ""]);
    assert_eq!(parts("{von Neumann}, John"), ["John", "", "", "{von Neumann}", ""]);
}

#[test]
fn all_lowercase_keeps_a_last_name() {
    assert_eq!(parts("jean de la fontaine"), ["", "", "jean de la", "fontaine", ""]);
}

#[test]
fn empty_name() {
    assert!(Person::parse("   ").unwrap().is_empty());
}

#[test]
fn too_many_commas() {
    let err = parse_person_name("a, b, c, d").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidName(_)));
}

#[test]
fn display_reparses_to_the_same_parts() {
    for name in [
        "Jean de la Fontaine",
        "Ford, Jr., Henry",
        "Avinash K. Dixit",
        "{Barnes and Noble}",
    ] {
        let person = Person::parse(name).unwrap();
        let reparsed: Person = person.to_string().parse().unwrap();
        assert_eq!(reparsed, person, "{name}");
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn word() -> impl Strategy<Value = String> {
        prop_oneof!["[A-Z][a-z]{1,8}", "[a-z]{1,4}", "\\{[A-Za-z ]{1,8}\\}"]
    }

    proptest! {
        #[test]
        fn display_round_trips(words in prop::collection::vec(word(), 1..5), lineage in proptest::option::of("[A-Z][a-z]{1,3}")) {
            let mut name = words.join(" ");
            if let Some(jr) = lineage {
                name = format!("{}, {jr}, {}", words.join(" "), "Ann");
            }
            let person = Person::parse(&name).unwrap();
            let reparsed = Person::parse(&person.to_string()).unwrap();
            prop_assert_eq!(reparsed, person);
        }
    }
}
