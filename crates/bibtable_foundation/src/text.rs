//! Brace-aware text utilities.
//!
//! Bibliography text treats `{...}` as a protected group: separators inside a
//! group never split, and letters inside a group do not count when judging a
//! word's case. Every splitter in the workspace goes through
//! [`split_tex_string`] or [`split_words`].

/// Splits `text` on `sep`, ignoring occurrences at positive brace depth.
///
/// The separator is matched ASCII case-insensitively, so `" AND "` splits a
/// name list the same way `" and "` does. Pieces are returned untrimmed.
///
/// ```
/// use bibtable_foundation::text::split_tex_string;
///
/// assert_eq!(split_tex_string("a, {b, c}, d", ","), vec!["a", " {b, c}", " d"]);
/// ```
#[must_use]
pub fn split_tex_string<'a>(text: &'a str, sep: &str) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    if sep.is_empty() {
        pieces.push(text);
        return pieces;
    }

    let bytes = text.as_bytes();
    let sep = sep.as_bytes();
    let mut depth = 0usize;
    let mut piece_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            _ if depth == 0
                && bytes.len() - pos >= sep.len()
                && bytes[pos..pos + sep.len()].eq_ignore_ascii_case(sep) =>
            {
                pieces.push(&text[piece_start..pos]);
                pos += sep.len();
                piece_start = pos;
                continue;
            }
            _ => {}
        }
        pos += 1;
    }
    pieces.push(&text[piece_start..]);
    pieces
}

/// Splits a name list on `" and "` at brace depth zero.
///
/// Each name is trimmed; an empty or all-blank list yields no names.
#[must_use]
pub fn split_name_list(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    split_tex_string(text, " and ")
        .into_iter()
        .map(str::trim)
        .collect()
}

/// Splits `text` into words on whitespace and `~` ties at brace depth zero.
///
/// Empty words are dropped.
#[must_use]
pub fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut depth = 0usize;
    let mut word_start: Option<usize> = None;

    for (pos, c) in text.char_indices() {
        let is_separator = depth == 0 && (c.is_whitespace() || c == '~');
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if is_separator {
            if let Some(start) = word_start.take() {
                words.push(&text[start..pos]);
            }
        } else if word_start.is_none() {
            word_start = Some(pos);
        }
    }
    if let Some(start) = word_start {
        words.push(&text[start..]);
    }
    words
}

/// Collapses every run of whitespace to a single space and trims both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns true if every letter of `word` at brace depth zero is lowercase.
///
/// A word with no letters at depth zero (for example `{Barnes}` or `1984`)
/// is not lowercase.
#[must_use]
pub fn is_lowercase_word(word: &str) -> bool {
    let mut depth = 0usize;
    let mut saw_letter = false;
    for c in word.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            c if depth == 0 && c.is_alphabetic() => {
                if !c.is_lowercase() {
                    return false;
                }
                saw_letter = true;
            }
            _ => {}
        }
    }
    saw_letter
}

/// Returns true if braces in `text` never close below depth zero and end balanced.
#[must_use]
pub fn braces_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

/// Counts characters, not counting braces.
#[must_use]
pub fn text_length(text: &str) -> usize {
    text.chars().filter(|c| *c != '{' && *c != '}').count()
}

/// Removes everything except letters, digits, and spaces.
///
/// Hyphens and ties become spaces. A control word such as `\ss` keeps its
/// letters; a control symbol such as `\'` is dropped.
#[must_use]
pub fn purify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.peek().is_some_and(|next| !next.is_alphabetic()) {
                    chars.next();
                }
            }
            '-' | '~' => out.push(' '),
            c if c.is_alphanumeric() || c.is_whitespace() => out.push(c),
            _ => {}
        }
    }
    out
}
