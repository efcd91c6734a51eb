//! Bibliography entries.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::person::Person;

/// The field that names a cross-referenced entry.
pub const CROSSREF_FIELD: &str = "crossref";

/// One bibliographic record: a type, plain fields, and person lists by role.
///
/// Field names, role names, and the entry type are stored lowercase. The
/// sequence number and label are the only state set after parsing, and only
/// once (see [`crate::EntryTable::assign_labels`]).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    entry_type: String,
    fields: BTreeMap<String, String>,
    persons: BTreeMap<String, Vec<Person>>,
    number: Option<usize>,
    label: Option<String>,
}

impl Entry {
    /// Creates an empty entry of the given type.
    #[must_use]
    pub fn new(entry_type: impl AsRef<str>) -> Self {
        Self {
            entry_type: entry_type.as_ref().to_lowercase(),
            fields: BTreeMap::new(),
            persons: BTreeMap::new(),
            number: None,
            label: None,
        }
    }

    /// Builder method to add a field.
    #[must_use]
    pub fn with_field(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert_field(name, value);
        self
    }

    /// Builder method to add a person under a role.
    #[must_use]
    pub fn with_person(mut self, role: impl AsRef<str>, person: Person) -> Self {
        self.add_person(role, person);
        self
    }

    /// Returns the lowercase entry type.
    #[must_use]
    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    /// Inserts a field unless one with the same name already exists.
    ///
    /// Returns false (and keeps the existing value) for a repeated field.
    pub fn insert_field(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> bool {
        let name = name.as_ref().to_lowercase();
        if self.fields.contains_key(&name) {
            return false;
        }
        self.fields.insert(name, value.into());
        true
    }

    /// Appends a person to the list for `role`.
    pub fn add_person(&mut self, role: impl AsRef<str>, person: Person) {
        self.persons
            .entry(role.as_ref().to_lowercase())
            .or_default()
            .push(person);
    }

    /// Returns an explicitly set field, without any fallback.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Iterates over explicit fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the persons for a role (empty if the role is absent).
    #[must_use]
    pub fn persons(&self, role: &str) -> &[Person] {
        self.persons
            .get(&role.to_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Iterates over `(role, persons)` pairs in role order.
    pub fn roles(&self) -> impl Iterator<Item = (&str, &[Person])> {
        self.persons.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Renders a role's persons joined with `" and "`, if the role is present.
    #[must_use]
    pub fn render_persons(&self, role: &str) -> Option<String> {
        let persons = self.persons.get(&role.to_lowercase())?;
        Some(
            persons
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" and "),
        )
    }

    /// The key of the cross-referenced entry, if declared.
    #[must_use]
    pub fn crossref(&self) -> Option<&str> {
        self.fields.get(CROSSREF_FIELD).map(String::as_str)
    }

    /// The 1-based sequence number assigned at citation resolution.
    #[must_use]
    pub fn number(&self) -> Option<usize> {
        self.number
    }

    /// The label assigned at citation resolution.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn is_labelled(&self) -> bool {
        self.number.is_some()
    }

    pub(crate) fn set_label(&mut self, number: usize, label: String) {
        self.number = Some(number);
        self.label = Some(label);
    }
}

/// Entries compare by type, fields, and persons; labels are not content.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.entry_type == other.entry_type
            && self.fields == other.fields
            && self.persons == other.persons
    }
}

impl Eq for Entry {}
