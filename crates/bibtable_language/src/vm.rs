//! Stack-based virtual machine for style programs.
//!
//! The VM runs [`Instruction`]s against one data stack. Names resolve, in
//! order, to the current entry's variables, the program's declared fields,
//! global variables, user functions, and finally builtins. Global variables
//! and the output buffer persist across entries; entry variables are reset
//! at the start of every entry.

mod builtins;

pub use builtins::{BUILTIN_NAMES, is_builtin};

use std::collections::HashMap;
use std::sync::Arc;

use bibtable_foundation::{Error, ErrorKind, Result, ValueType};
use bibtable_storage::{Entry, EntryTable};
use tracing::{debug, trace, warn};

use crate::instruction::Instruction;
use crate::program::StyleProgram;
use crate::value::{Callable, Value};

/// Stack-based virtual machine.
pub struct Vm<'a> {
    /// The program being run.
    program: &'a StyleProgram,
    /// The database entries are read from.
    table: Option<&'a EntryTable>,
    /// Operand stack.
    stack: Vec<Value>,
    /// Global variables (persist across entries).
    globals: HashMap<Arc<str>, Value>,
    /// Variables of the current entry.
    locals: im::HashMap<Arc<str>, Value>,
    /// Canonical key of the entry being formatted.
    current: Option<String>,
    /// Everything written so far.
    output: String,
    /// Messages from `warning$` and recoverable builtin misuse.
    warnings: Vec<String>,
    /// Log every executed instruction.
    trace: bool,
}

impl<'a> Vm<'a> {
    /// Creates a VM for `program` with no database.
    #[must_use]
    pub fn new(program: &'a StyleProgram) -> Self {
        Self {
            program,
            table: None,
            stack: Vec::with_capacity(64),
            globals: program.globals(),
            locals: im::HashMap::new(),
            current: None,
            output: String::new(),
            warnings: Vec::new(),
            trace: false,
        }
    }

    /// Builder method to attach the database.
    #[must_use]
    pub fn with_table(mut self, table: &'a EntryTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Builder method to log every executed instruction at trace level.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// The program being run.
    #[must_use]
    pub fn program(&self) -> &'a StyleProgram {
        self.program
    }

    /// Executes a sequence of instructions.
    ///
    /// # Errors
    ///
    /// Returns the first interpreter error; the VM state is left as it was at
    /// the failing instruction.
    pub fn execute(&mut self, code: &[Instruction]) -> Result<()> {
        for instruction in code {
            if self.trace {
                trace!(instruction = %instruction, depth = self.stack.len(), "execute");
            }
            match instruction {
                Instruction::Str(s) => self.push(Value::String(Arc::clone(s))),
                Instruction::Int(n) => self.push(Value::Int(*n)),
                Instruction::Quote(name) => {
                    self.push(Value::Function(Callable::Named(Arc::clone(name))));
                }
                Instruction::Block(body) => {
                    self.push(Value::Function(Callable::Body(Arc::clone(body))));
                }
                Instruction::Call(name) => self.call(name)?,
            }
        }
        Ok(())
    }

    /// Resolves and runs a name.
    ///
    /// Variables and fields push their value; functions run.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedSymbol` if nothing has that name, or any error
    /// raised while running it.
    pub fn call(&mut self, name: &str) -> Result<()> {
        let program = self.program;
        if let Some(value) = self.locals.get(name) {
            let value = value.clone();
            self.push(value);
            return Ok(());
        }
        if program.is_entry_variable(name) {
            return Err(Error::new(ErrorKind::NoCurrentEntry { op: name.to_string() }));
        }
        if program.is_field(name) {
            let value = self.field_value(name)?;
            self.push(value);
            return Ok(());
        }
        if let Some(value) = self.globals.get(name) {
            let value = value.clone();
            self.push(value);
            return Ok(());
        }
        if let Some(body) = program.function(name) {
            return self
                .execute(body)
                .map_err(|e| e.in_frame(format!("function {name}")));
        }
        if let Some(builtin) = builtins::lookup(name) {
            return builtin(self);
        }
        Err(Error::undefined_symbol(name))
    }

    /// Runs a function value.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the function.
    pub fn run_callable(&mut self, callable: &Callable) -> Result<()> {
        match callable {
            Callable::Named(name) => self.call(name),
            Callable::Body(body) => self.execute(body),
        }
    }

    /// Runs the program's prologue.
    ///
    /// # Errors
    ///
    /// Returns any interpreter error, framed as coming from the prologue.
    pub fn run_prologue(&mut self) -> Result<()> {
        let program = self.program;
        self.execute(program.prologue())
            .map_err(|e| e.in_frame("prologue"))
    }

    /// Runs the program's epilogue.
    ///
    /// # Errors
    ///
    /// Returns any interpreter error, framed as coming from the epilogue.
    pub fn run_epilogue(&mut self) -> Result<()> {
        let program = self.program;
        self.execute(program.epilogue())
            .map_err(|e| e.in_frame("epilogue"))
    }

    /// Makes `key` the current entry and resets entry variables.
    ///
    /// # Errors
    ///
    /// Returns an error if no database is attached or it has no such key.
    pub fn begin_entry(&mut self, key: &str) -> Result<()> {
        let canonical = self
            .table
            .and_then(|table| table.canonical_key(key))
            .ok_or_else(|| Error::new(ErrorKind::Internal(format!("no entry for key {key}"))))?;
        self.current = Some(canonical.to_string());
        self.locals = self.program.entry_locals();
        Ok(())
    }

    /// Leaves per-entry execution.
    pub fn end_entry(&mut self) {
        self.current = None;
        self.locals = im::HashMap::new();
    }

    /// Runs the entry routine for `key` and returns what it wrote.
    ///
    /// # Errors
    ///
    /// Returns any interpreter error; the entry is left either way.
    pub fn format_entry(&mut self, key: &str) -> Result<String> {
        self.begin_entry(key)?;
        let mark = self.output.len();
        let program = self.program;
        let result = self.execute(program.entry_routine());
        self.end_entry();
        result?;

        if !self.stack.is_empty() {
            debug!(key, depth = self.stack.len(), "stack not empty after entry");
        }
        Ok(self.output[mark..].to_string())
    }

    /// The operand stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Takes the output buffer, leaving it empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Takes the recorded warnings.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// A global variable's value.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// An entry variable's value, while an entry is current.
    #[must_use]
    pub fn local(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }

    /// Pushes a value.
    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pops a value on behalf of `op`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self, op: &str) -> Result<Value> {
        self.stack.pop().ok_or_else(|| Error::stack_underflow(op))
    }

    pub(crate) fn pop_int(&mut self, op: &str) -> Result<i64> {
        self.pop(op)?.as_int(op)
    }

    pub(crate) fn pop_string(&mut self, op: &str) -> Result<Arc<str>> {
        match self.pop(op)? {
            Value::String(s) => Ok(s),
            Value::Missing => Ok(Arc::from("")),
            other => Err(Error::type_mismatch(op, ValueType::String, other.value_type())),
        }
    }

    pub(crate) fn pop_callable(&mut self, op: &str) -> Result<Callable> {
        self.pop(op)?.into_callable(op)
    }

    pub(crate) fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub(crate) fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }

    /// Assigns to an entry or global variable, keeping its declared type.
    pub(crate) fn assign(&mut self, name: &str, value: Value) -> Result<()> {
        if let Some(slot) = self.locals.get_mut(name) {
            *slot = typed(slot, value)?;
            return Ok(());
        }
        if self.program.is_entry_variable(name) {
            return Err(Error::new(ErrorKind::NoCurrentEntry { op: ":=".to_string() }));
        }
        match self.globals.get_mut(name) {
            Some(slot) => {
                *slot = typed(slot, value)?;
                Ok(())
            }
            None => Err(Error::undefined_symbol(name)),
        }
    }

    pub(crate) fn current_key(&self, op: &str) -> Result<&str> {
        self.current
            .as_deref()
            .ok_or_else(|| Error::new(ErrorKind::NoCurrentEntry { op: op.to_string() }))
    }

    pub(crate) fn current_entry(&self, op: &str) -> Result<&'a Entry> {
        let key = self.current_key(op)?;
        self.table
            .and_then(|table| table.get(key))
            .ok_or_else(|| Error::new(ErrorKind::NoCurrentEntry { op: op.to_string() }))
    }

    pub(crate) fn preamble(&self) -> String {
        self.table.map(EntryTable::preamble).unwrap_or_default()
    }

    fn field_value(&self, name: &str) -> Result<Value> {
        let key = self.current_key(name)?;
        let Some(table) = self.table else {
            return Ok(Value::Missing);
        };
        Ok(match table.lookup_field(key, name)? {
            Some(value) => Value::String(Arc::from(value.as_ref())),
            None => Value::Missing,
        })
    }
}

/// Checks `value` against the type of the variable currently in `slot`.
fn typed(slot: &Value, value: Value) -> Result<Value> {
    match (slot, value) {
        (Value::Int(_), value @ Value::Int(_)) | (Value::String(_), value @ Value::String(_)) => {
            Ok(value)
        }
        (Value::String(_), Value::Missing) => Ok(Value::from("")),
        (slot, value) => Err(Error::type_mismatch(":=", slot.value_type(), value.value_type())),
    }
}
