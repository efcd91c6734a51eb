//! The database parser: records in, an [`EntryTable`] out.
//!
//! The outer loop scans to each `@`, parses one record into a [`Record`], and
//! applies it. A record that fails to parse becomes a diagnostic; scanning
//! resumes at the next `@`, so one bad record never costs the rest of the
//! file.

use std::collections::HashSet;
use std::path::Path;

use bibtable_foundation::text::{normalize_whitespace, split_name_list};
use bibtable_foundation::{Error, ErrorKind, Location, Result};
use bibtable_storage::{Entry, EntryTable, Person};
use tracing::{debug, trace, warn};

use crate::config::ParserConfig;
use crate::macros::MacroTable;
use crate::scanner::Scanner;
use crate::token::Pattern;

/// The outcome of parsing one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    /// A bibliographic entry.
    Entry {
        /// The citation key as written.
        key: String,
        /// The parsed entry.
        entry: Entry,
    },
    /// An `@string` macro definition.
    Macro {
        /// The macro name as written.
        name: String,
        /// The replacement text.
        value: String,
    },
    /// An `@preamble` fragment.
    Preamble(String),
    /// A record with nothing to keep, such as `@comment`.
    Skip,
}

/// Parser for bibliography databases.
///
/// Holds the configuration and the diagnostics of the most recent parse.
#[derive(Debug, Default)]
pub struct DatabaseParser {
    config: ParserConfig,
    diagnostics: Vec<Error>,
}

impl DatabaseParser {
    /// Creates a parser with the given configuration.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            diagnostics: Vec::new(),
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Record-level errors recovered during the last parse.
    #[must_use]
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Takes the diagnostics, leaving none behind.
    pub fn take_diagnostics(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Parses a whole database.
    ///
    /// Malformed records are skipped and reported through
    /// [`DatabaseParser::diagnostics`]; they do not fail the parse.
    ///
    /// # Errors
    ///
    /// Does not fail for in-memory text; file-level failures come from
    /// [`DatabaseParser::parse_file`].
    pub fn parse(&mut self, text: &str) -> Result<EntryTable> {
        self.diagnostics.clear();
        let mut macros = self.config.macros.clone();
        let mut scanner = Scanner::new(text);
        let mut table = EntryTable::new();

        while scanner.skip_to(&[Pattern::At]).is_some() {
            match self.parse_record(&mut scanner, &macros) {
                Ok(Record::Entry { key, entry }) => {
                    debug!(key = %key, entry_type = entry.entry_type(), "parsed entry");
                    if let Err(err) = table.insert(key, entry) {
                        self.recover(err);
                    }
                }
                Ok(Record::Macro { name, value }) => {
                    trace!(name = %name, value = %value, "defined macro");
                    macros.define(&name, value);
                }
                Ok(Record::Preamble(fragment)) => {
                    debug!(len = fragment.len(), "parsed preamble");
                    table.add_to_preamble(fragment);
                }
                Ok(Record::Skip) => debug!("skipped record"),
                Err(err) => self.recover(err),
            }
        }
        Ok(table)
    }

    /// Reads and parses a database file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read as UTF-8 text.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<EntryTable> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!("{}: {e}", path.display())))
        })?;
        self.parse(&text)
    }

    fn recover(&mut self, err: Error) {
        warn!("{}", err.render());
        self.diagnostics.push(err);
    }

    /// Parses one record; the scanner is just past its `@`.
    fn parse_record(&mut self, scanner: &mut Scanner<'_>, macros: &MacroTable) -> Result<Record> {
        let name = scanner.require(&[Pattern::Name])?;
        let open = scanner.require(&[Pattern::LBrace, Pattern::LParen])?;
        let close = open.pattern.closer().unwrap_or(Pattern::RBrace);

        match name.value.to_lowercase().as_str() {
            "string" => {
                let macro_name = scanner.require(&[Pattern::Name])?;
                scanner.require(&[Pattern::Equals])?;
                let value = parse_value(scanner, macros)?;
                scanner.require(&[close])?;
                Ok(Record::Macro {
                    name: macro_name.value.to_string(),
                    value,
                })
            }
            "preamble" => {
                let value = parse_value(scanner, macros)?;
                scanner.require(&[close])?;
                Ok(Record::Preamble(value))
            }
            "comment" => Ok(Record::Skip),
            entry_type => self.parse_entry(scanner, macros, entry_type, close),
        }
    }

    fn parse_entry(
        &mut self,
        scanner: &mut Scanner<'_>,
        macros: &MacroTable,
        entry_type: &str,
        close: Pattern,
    ) -> Result<Record> {
        let key = scanner.require(&[Pattern::Key])?.value.to_string();
        let mut entry = Entry::new(entry_type);
        let mut seen = HashSet::new();
        let mut repeated = Vec::new();

        loop {
            let separator = scanner.require(&[Pattern::Comma, close])?;
            if separator.pattern != Pattern::Comma {
                break;
            }
            // A trailing comma before the closer is allowed.
            let Some(field) = scanner.next_token(&[Pattern::Name])? else {
                continue;
            };
            scanner.require(&[Pattern::Equals])?;
            let value = parse_value(scanner, macros)?;

            let field = field.value.to_lowercase();
            if !seen.insert(field.clone()) {
                repeated.push(field);
                continue;
            }
            if self.config.is_person_field(&field) {
                for name in split_name_list(&value) {
                    entry.add_person(&field, Person::parse(name)?);
                }
            } else {
                entry.insert_field(&field, value);
            }
        }

        for field in repeated {
            self.recover(Error::new(ErrorKind::RepeatedField {
                key: key.clone(),
                field,
            }));
        }
        Ok(Record::Entry { key, entry })
    }
}

/// Parses a `#`-concatenated value and normalizes its whitespace.
fn parse_value(scanner: &mut Scanner<'_>, macros: &MacroTable) -> Result<String> {
    let mut value = String::new();
    loop {
        let part = scanner.require(&[Pattern::Quote, Pattern::LBrace, Pattern::Number, Pattern::Name])?;
        match part.pattern {
            Pattern::Quote => value.push_str(parse_delimited(scanner, Pattern::Quote)?),
            Pattern::LBrace => value.push_str(parse_delimited(scanner, Pattern::RBrace)?),
            Pattern::Number => value.push_str(part.value),
            _ => {
                let expansion = macros
                    .get(part.value)
                    .ok_or_else(|| Error::undefined_macro(part.value))?;
                value.push_str(expansion);
            }
        }
        if scanner.next_token(&[Pattern::Hash])?.is_none() {
            break;
        }
    }
    Ok(normalize_whitespace(&value))
}

/// Reads the body of a quoted or braced part, up to `end`.
///
/// Nested braces must balance; a quote only terminates at brace depth zero.
/// Returns the body without its terminator.
fn parse_delimited<'src>(scanner: &mut Scanner<'src>, end: Pattern) -> Result<&'src str> {
    let start = scanner.position();
    let mut depth = 0usize;
    loop {
        let specials: &[Pattern] = if depth == 0 && end == Pattern::Quote {
            &[Pattern::Quote, Pattern::LBrace, Pattern::RBrace]
        } else {
            &[Pattern::LBrace, Pattern::RBrace]
        };
        let Some(token) = scanner.skip_to(specials) else {
            let text = scanner.text();
            return Err(Error::premature_eof(Location::locate(text, text.len())));
        };
        match token.pattern {
            Pattern::LBrace => depth += 1,
            Pattern::RBrace if depth > 0 => depth -= 1,
            Pattern::RBrace if end == Pattern::Quote => {
                let brace = token.span.end - 1;
                return Err(Error::unbalanced_brace(Location::locate(scanner.text(), brace)));
            }
            _ => return Ok(&scanner.text()[start..token.span.end - 1]),
        }
    }
}

/// Parses a database with the default configuration.
///
/// Record-level errors are logged and skipped; use [`DatabaseParser`] to
/// inspect them.
///
/// # Errors
///
/// See [`DatabaseParser::parse`].
pub fn parse_database(text: &str) -> Result<EntryTable> {
    DatabaseParser::default().parse(text)
}
