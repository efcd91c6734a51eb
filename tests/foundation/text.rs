//! Integration tests for brace-aware text utilities

use bibtable_foundation::text::{
    braces_balanced, is_lowercase_word, normalize_whitespace, purify, split_name_list,
    split_tex_string, split_words, text_length,
};

// =============================================================================
// Splitting
// =============================================================================

#[test]
fn separators_inside_braces_do_not_split() {
    assert_eq!(split_tex_string("a, {b, c}, d", ","), vec!["a", " {b, c}", " d"]);
    assert_eq!(split_tex_string("{a,b}", ","), vec!["{a,b}"]);
}

#[test]
fn name_lists() {
    assert_eq!(
        split_name_list("Ada Lovelace and {Barnes and Noble}"),
        vec!["Ada Lovelace", "{Barnes and Noble}"]
    );
    assert_eq!(split_name_list("A. Smith AND B. Jones"), vec!["A. Smith", "B. Jones"]);
    assert!(split_name_list("   ").is_empty());
}

#[test]
fn words_split_on_spaces_and_ties() {
    assert_eq!(
        split_words("Michail~Markovitch  {van Dyke}"),
        vec!["Michail", "Markovitch", "{van Dyke}"]
    );
    assert!(split_words("").is_empty());
}

// =============================================================================
// Predicates and Measures
// =============================================================================

#[test]
fn whitespace_is_normalized() {
    assert_eq!(normalize_whitespace("  The\n   Art \t of "), "The Art of");
}

#[test]
fn lowercase_words() {
    assert!(is_lowercase_word("von"));
    assert!(is_lowercase_word("de"));
    assert!(!is_lowercase_word("Dixit"));
    assert!(!is_lowercase_word("{Barnes}"));
    assert!(!is_lowercase_word("1984"));
}

#[test]
fn brace_balance() {
    assert!(braces_balanced("{a}{b{c}}"));
    assert!(braces_balanced("plain"));
    assert!(!braces_balanced("}{"));
    assert!(!braces_balanced("{"));
}

#[test]
fn length_ignores_braces() {
    assert_eq!(text_length("{\\'E}mile"), 7);
    assert_eq!(text_length("{}"), 0);
}

#[test]
fn purify_keeps_letters_digits_and_spaces() {
    assert_eq!(purify("Jean-Pierre~{\\'E}mile"), "Jean Pierre Emile");
    assert_eq!(purify("Stra\\ss{}e 42!"), "Strasse 42");
}
