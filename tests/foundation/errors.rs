//! Integration tests for Error types
//!
//! Tests error construction, categories, context, and rendering.

use bibtable_foundation::{Error, ErrorCategory, ErrorKind, Location, ValueType};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_stack_underflow() {
    let err = Error::stack_underflow("pop$");
    assert!(matches!(err.kind, ErrorKind::StackUnderflow { .. }));
    assert_eq!(err.category(), ErrorCategory::Interpreter);
    assert!(err.to_string().contains("pop$"));
}

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch("+", ValueType::Integer, ValueType::String);
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert!(err.to_string().starts_with("+:"));
}

#[test]
fn error_duplicate_key() {
    let err = Error::duplicate_key("knuth84");
    assert_eq!(err.category(), ErrorCategory::Data);
    assert!(err.to_string().contains("knuth84"));
}

#[test]
fn error_repeated_field_is_data() {
    let err = Error::new(ErrorKind::RepeatedField {
        key: "k".into(),
        field: "title".into(),
    });
    assert_eq!(err.category(), ErrorCategory::Data);
    assert_eq!(err.to_string(), "repeated field title in entry k");
}

#[test]
fn error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = Error::from(io);
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    assert_eq!(err.category(), ErrorCategory::Io);
}

// =============================================================================
// Locations and Rendering
// =============================================================================

#[test]
fn syntax_errors_carry_locations() {
    let source = "@book{x,\n  title = {";
    let err = Error::premature_eof(Location::locate(source, source.len()));
    assert_eq!(err.category(), ErrorCategory::Syntax);

    let location = err.location().unwrap();
    assert_eq!(location.line, 2);
    assert_eq!(location.column, 12);
    assert_eq!(location.context, "  title = {");
}

#[test]
fn render_shows_line_and_caret() {
    let source = "@article{key,\n  year = }\n";
    let err = Error::unbalanced_brace(Location::locate(source, 23));
    let rendered = err.render();
    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("unbalanced brace"));
    assert_eq!(lines[1], "  year = }");
    assert_eq!(lines[2], "         ^");
}

#[test]
fn frames_render_innermost_first() {
    let err = Error::stack_underflow("pop$")
        .in_frame("function output")
        .in_frame("entry knuth84");
    let rendered = err.render();
    assert_eq!(
        rendered,
        "stack underflow in pop$\n  in function output\n  in entry knuth84"
    );
}

#[test]
fn non_syntax_errors_have_no_location() {
    assert!(Error::undefined_macro("tug").location().is_none());
    assert!(Error::invalid_name("a, b, c, d").location().is_none());
}
