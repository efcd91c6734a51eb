//! Structured personal names.
//!
//! A free-text name is decomposed into five ordered word sequences: first,
//! middle, prelast ("von"), last, and lineage ("Jr"). Three input forms are
//! recognised, chosen by the number of top-level commas:
//!
//! - `First von Last`
//! - `von Last, First`
//! - `von Last, Jr, First`

use std::fmt;
use std::str::FromStr;

use bibtable_foundation::text::{is_lowercase_word, split_tex_string, split_words};
use bibtable_foundation::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the five parts of a personal name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamePart {
    /// The first given name.
    First,
    /// Remaining given names.
    Middle,
    /// The "von" particle(s).
    Prelast,
    /// The family name.
    Last,
    /// The "Jr" suffix.
    Lineage,
}

/// A parsed personal name.
///
/// Immutable after construction; equality is structural over the five parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Person {
    first: Vec<String>,
    middle: Vec<String>,
    prelast: Vec<String>,
    last: Vec<String>,
    lineage: Vec<String>,
}

impl Person {
    /// Parses a single name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if the name has more than three comma-separated parts.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        let mut person = Self::default();
        if name.is_empty() {
            return Ok(person);
        }

        let pieces: Vec<&str> = split_tex_string(name, ",")
            .into_iter()
            .map(str::trim)
            .collect();

        match pieces.as_slice() {
            [von_last, lineage, first_middle] => {
                person.take_von_last(&split_words(von_last));
                person.lineage = owned(&split_words(lineage));
                person.take_first_middle(&split_words(first_middle));
            }
            [von_last, first_middle] => {
                person.take_von_last(&split_words(von_last));
                person.take_first_middle(&split_words(first_middle));
            }
            [whole] => {
                let words = split_words(whole);
                let boundary = first_von_last_boundary(&words);
                person.take_first_middle(&words[..boundary]);
                person.take_von_last(&words[boundary..]);
            }
            _ => return Err(Error::invalid_name(name)),
        }

        Ok(person)
    }

    /// Builds a name from explicit parts, each split into words.
    #[must_use]
    pub fn from_parts(first: &str, middle: &str, prelast: &str, last: &str, lineage: &str) -> Self {
        Self {
            first: owned(&split_words(first)),
            middle: owned(&split_words(middle)),
            prelast: owned(&split_words(prelast)),
            last: owned(&split_words(last)),
            lineage: owned(&split_words(lineage)),
        }
    }

    /// Returns the words of the given part.
    #[must_use]
    pub fn part(&self, part: NamePart) -> &[String] {
        match part {
            NamePart::First => &self.first,
            NamePart::Middle => &self.middle,
            NamePart::Prelast => &self.prelast,
            NamePart::Last => &self.last,
            NamePart::Lineage => &self.lineage,
        }
    }

    /// First name words.
    #[must_use]
    pub fn first(&self) -> &[String] {
        &self.first
    }

    /// Middle name words.
    #[must_use]
    pub fn middle(&self) -> &[String] {
        &self.middle
    }

    /// "von" words.
    #[must_use]
    pub fn prelast(&self) -> &[String] {
        &self.prelast
    }

    /// Last name words.
    #[must_use]
    pub fn last(&self) -> &[String] {
        &self.last
    }

    /// Lineage words.
    #[must_use]
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    /// First and middle names together, which styles treat as one part.
    #[must_use]
    pub fn bibtex_first(&self) -> Vec<&str> {
        self.first
            .iter()
            .chain(&self.middle)
            .map(String::as_str)
            .collect()
    }

    /// Returns true if every part is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
            && self.middle.is_empty()
            && self.prelast.is_empty()
            && self.last.is_empty()
            && self.lineage.is_empty()
    }

    fn take_first_middle(&mut self, words: &[&str]) {
        if let Some((first, middle)) = words.split_first() {
            self.first.push((*first).to_string());
            self.middle.extend(middle.iter().map(|w| (*w).to_string()));
        }
    }

    /// The von part runs up to and including the last lowercase word that is
    /// not the final word; everything after it is the last name.
    fn take_von_last(&mut self, words: &[&str]) {
        let Some((_, candidates)) = words.split_last() else {
            return;
        };
        let boundary = candidates
            .iter()
            .rposition(|w| is_lowercase_word(w))
            .map_or(0, |i| i + 1);
        self.prelast.extend(owned(&words[..boundary]));
        self.last.extend(owned(&words[boundary..]));
    }
}

/// Index of the first word of `von Last` in a `First von Last` name.
///
/// That is the first lowercase word; if there is none, only the final word
/// belongs to the last name.
fn first_von_last_boundary(words: &[&str]) -> usize {
    let Some((_, candidates)) = words.split_last() else {
        return 0;
    };
    candidates
        .iter()
        .position(|w| is_lowercase_word(w))
        .unwrap_or(candidates.len())
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Parses a single name into a [`Person`].
///
/// # Errors
///
/// Returns `InvalidName` if the name has more than three comma-separated parts.
pub fn parse_person_name(name: &str) -> Result<Person> {
    Person::parse(name)
}

impl FromStr for Person {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Renders as `von Last, Jr, First Middle`, omitting empty components.
///
/// A lineage is always followed by the first-name slot, even when it is
/// empty, so the output parses back to the same parts.
impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let von_last = self
            .prelast
            .iter()
            .chain(&self.last)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let first = self.bibtex_first().join(" ");

        f.write_str(&von_last)?;
        if !self.lineage.is_empty() {
            write!(f, ", {}, {first}", self.lineage.join(" "))
        } else if first.is_empty() {
            Ok(())
        } else {
            write!(f, ", {first}")
        }
    }
}
