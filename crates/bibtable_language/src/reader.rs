//! Reader for postfix instruction text.
//!
//! Turns the body syntax of style functions into [`Instruction`]s:
//!
//! | Syntax      | Instruction                 |
//! |-------------|-----------------------------|
//! | `"text"`    | [`Instruction::Str`]        |
//! | `#12`       | [`Instruction::Int`]        |
//! | `'name`     | [`Instruction::Quote`]      |
//! | `{ ... }`   | [`Instruction::Block`]      |
//! | `name`      | [`Instruction::Call`]       |
//!
//! `%` starts a comment that runs to the end of the line.

use bibtable_foundation::{Error, Location, Result};

use crate::instruction::Instruction;

/// Reads a sequence of instructions.
///
/// # Errors
///
/// Returns a syntax error for an unterminated string or block, a stray `}`,
/// or a malformed integer literal.
///
/// ```
/// use bibtable_language::{Instruction, read_instructions};
///
/// let code = read_instructions("title empty$ { \"\" } { title } if$").unwrap();
/// assert_eq!(code[0], Instruction::call("title"));
/// assert_eq!(code.len(), 5);
/// ```
pub fn read_instructions(source: &str) -> Result<Vec<Instruction>> {
    let mut reader = Reader::new(source);
    let code = reader.read_sequence()?;
    match reader.peek_char() {
        Some('}') => Err(Error::unbalanced_brace(reader.location())),
        _ => Ok(code),
    }
}

/// Reader state over instruction text.
struct Reader<'src> {
    /// Source text being read.
    source: &'src str,
    /// Current byte offset in source.
    position: usize,
}

impl<'src> Reader<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Reads instructions up to end of input or an unconsumed `}`.
    fn read_sequence(&mut self) -> Result<Vec<Instruction>> {
        let mut code = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let Some(c) = self.peek_char() else {
                return Ok(code);
            };
            let instruction = match c {
                '}' => return Ok(code),
                '{' => self.read_block()?,
                '"' => self.read_string()?,
                '#' => self.read_int()?,
                '\'' => {
                    self.advance();
                    let name = self.read_name();
                    if name.is_empty() {
                        return Err(Error::token_required("name after '", self.location()));
                    }
                    Instruction::quote(name)
                }
                _ => Instruction::call(self.read_name()),
            };
            code.push(instruction);
        }
    }

    fn read_block(&mut self) -> Result<Instruction> {
        let open = self.location();
        self.advance();
        let body = self.read_sequence()?;
        if self.peek_char() != Some('}') {
            return Err(Error::premature_eof(open));
        }
        self.advance();
        Ok(Instruction::block(body))
    }

    fn read_string(&mut self) -> Result<Instruction> {
        let open = self.location();
        self.advance();
        let rest = &self.source[self.position..];
        let Some(len) = rest.find('"') else {
            return Err(Error::premature_eof(open));
        };
        let text = &rest[..len];
        self.position += len + 1;
        Ok(Instruction::str(text))
    }

    fn read_int(&mut self) -> Result<Instruction> {
        self.advance();
        let start = self.position;
        let literal = self.read_name();
        literal
            .parse::<i64>()
            .map(Instruction::Int)
            .map_err(|_| Error::token_required("integer after #", Location::locate(self.source, start)))
    }

    /// Reads up to whitespace, a brace, a quote, or a comment.
    fn read_name(&mut self) -> &'src str {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || matches!(c, '{' | '}' | '"' | '%') {
                break;
            }
            self.advance();
        }
        &self.source[start..self.position]
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else if c == '%' {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.position += c.len_utf8();
        }
    }

    fn location(&self) -> Location {
        Location::locate(self.source, self.position)
    }
}
