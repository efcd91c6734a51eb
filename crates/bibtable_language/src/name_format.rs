//! Name formatting for `format.name$`.
//!
//! A pattern is literal text with brace groups. Each group names one part of
//! the name with a letter (`f` first and middle, `v` von, `l` last, `j`
//! lineage). A doubled letter writes the words in full; a single letter
//! abbreviates each to its first letter. Text before the letters is written
//! before the part and text after them is written after it, but only when the
//! part is non-empty. An optional brace group right after the letters replaces
//! the separator between words.
//!
//! ```
//! use bibtable_language::format_name;
//! use bibtable_storage::Person;
//!
//! let person = Person::parse("Avinash K. Dixit").unwrap();
//! assert_eq!(format_name(&person, "{vv~}{ll}{, f.}"), "Dixit, A.~K.");
//! ```

use bibtable_storage::Person;

/// Formats `person` according to `pattern`.
#[must_use]
pub fn format_name(person: &Person, pattern: &str) -> String {
    let mut out = String::new();
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let (group, after) = split_group(&rest[open..]);
        out.push_str(&format_group(person, group));
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Splits `text` (starting at `{`) into the group's inner text and the
/// remainder after its closing brace. An unclosed group runs to the end.
fn split_group(text: &str) -> (&str, &str) {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (&text[1..i], &text[i + 1..]);
                }
            }
            _ => {}
        }
    }
    (&text[1..], "")
}

/// Without an explicit separator, words are tied with `~` before the final
/// word and after any word shorter than three characters, not only a short
/// first word.
fn format_group(person: &Person, group: &str) -> String {
    let mut depth = 0usize;
    let mut letter_at = None;
    for (i, c) in group.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            'f' | 'v' | 'l' | 'j' if depth == 0 => {
                letter_at = Some((i, c));
                break;
            }
            _ => {}
        }
    }
    let Some((start, letter)) = letter_at else {
        return group.to_string();
    };

    let pre = &group[..start];
    let mut rest = &group[start + 1..];
    let full = rest.starts_with(letter);
    if full {
        rest = &rest[1..];
    }
    let separator = if rest.starts_with('{') {
        let (inner, after) = split_group(rest);
        rest = after;
        Some(inner)
    } else {
        None
    };
    let post = rest;

    let words: Vec<&str> = match letter {
        'f' => person.bibtex_first(),
        'v' => person.prelast().iter().map(String::as_str).collect(),
        'l' => person.last().iter().map(String::as_str).collect(),
        _ => person.lineage().iter().map(String::as_str).collect(),
    };
    if words.is_empty() {
        return String::new();
    }

    let mut out = String::from(pre);
    for (i, &word) in words.iter().enumerate() {
        let token = if full { word } else { abbreviate(word) };
        out.push_str(token);
        if i + 1 == words.len() {
            break;
        }
        match separator {
            Some(sep) => out.push_str(sep),
            None => {
                if !full {
                    out.push('.');
                }
                let short = token.chars().count() < 3;
                out.push(if i + 2 == words.len() || short { '~' } else { ' ' });
            }
        }
    }
    out.push_str(post);
    out
}

/// The first letter of a word, or its whole leading brace group.
fn abbreviate(word: &str) -> &str {
    if word.starts_with('{') {
        let (_, after) = split_group(word);
        return &word[..word.len() - after.len()];
    }
    word.chars()
        .next()
        .map_or("", |c| &word[..c.len_utf8()])
}
