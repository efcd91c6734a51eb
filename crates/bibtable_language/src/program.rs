//! Style programs: declarations, functions, and the entry-type registry.

use std::collections::HashMap;
use std::sync::Arc;

use bibtable_foundation::Result;

use crate::instruction::Instruction;
use crate::reader::read_instructions;
use crate::value::Value;

/// The function `call.type$` falls back to for types without a routine.
pub const DEFAULT_TYPE_ROUTINE: &str = "default.type";

/// A loaded style program.
///
/// Everything is declared up front: the entry fields the program reads, its
/// entry-scoped and global variables, and its functions. The registry from
/// entry types to formatting routines is kept alongside the functions, so
/// `call.type$` never searches by string at run time.
#[derive(Clone, Debug)]
pub struct StyleProgram {
    fields: Vec<String>,
    entry_locals: im::HashMap<Arc<str>, Value>,
    globals: HashMap<Arc<str>, Value>,
    functions: HashMap<Arc<str>, Arc<[Instruction]>>,
    type_routines: HashMap<String, Arc<str>>,
    entry_routine: Arc<[Instruction]>,
    prologue: Arc<[Instruction]>,
    epilogue: Arc<[Instruction]>,
}

impl Default for StyleProgram {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            entry_locals: im::HashMap::new(),
            globals: HashMap::new(),
            functions: HashMap::new(),
            type_routines: HashMap::new(),
            entry_routine: vec![Instruction::call("call.type$")].into(),
            prologue: Arc::new([]),
            epilogue: Arc::new([]),
        }
    }
}

impl StyleProgram {
    /// Creates an empty program whose entry routine is `call.type$`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to declare entry fields.
    #[must_use]
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fields
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    /// Builder method to declare entry-scoped integer variables.
    #[must_use]
    pub fn with_entry_integers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.entry_locals.insert(lower(name.as_ref()), Value::Int(0));
        }
        self
    }

    /// Builder method to declare entry-scoped string variables.
    #[must_use]
    pub fn with_entry_strings<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.entry_locals.insert(lower(name.as_ref()), Value::from(""));
        }
        self
    }

    /// Builder method to declare global integer variables.
    #[must_use]
    pub fn with_global_integers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.globals.insert(lower(name.as_ref()), Value::Int(0));
        }
        self
    }

    /// Builder method to declare global string variables.
    #[must_use]
    pub fn with_global_strings<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.globals.insert(lower(name.as_ref()), Value::from(""));
        }
        self
    }

    /// Builder method to define a function.
    ///
    /// Every function is also registered as the routine for the entry type of
    /// the same name.
    #[must_use]
    pub fn with_function(mut self, name: &str, body: Vec<Instruction>) -> Self {
        let name = lower(name);
        self.type_routines.insert(name.to_string(), name.clone());
        self.functions.insert(name, body.into());
        self
    }

    /// Builder method to define a function from instruction text.
    ///
    /// # Errors
    ///
    /// Returns the reader's syntax error if `source` is malformed.
    pub fn with_function_source(self, name: &str, source: &str) -> Result<Self> {
        Ok(self.with_function(name, read_instructions(source)?))
    }

    /// Builder method to route an entry type to a differently named function.
    #[must_use]
    pub fn with_type_routine(mut self, entry_type: &str, function: &str) -> Self {
        self.type_routines
            .insert(entry_type.to_lowercase(), lower(function));
        self
    }

    /// Builder method to replace the per-entry routine.
    #[must_use]
    pub fn with_entry_routine(mut self, code: Vec<Instruction>) -> Self {
        self.entry_routine = code.into();
        self
    }

    /// Builder method to set the code run once before the first entry.
    #[must_use]
    pub fn with_prologue(mut self, code: Vec<Instruction>) -> Self {
        self.prologue = code.into();
        self
    }

    /// Builder method to set the code run once after the last entry.
    #[must_use]
    pub fn with_epilogue(mut self, code: Vec<Instruction>) -> Self {
        self.epilogue = code.into();
        self
    }

    /// Returns true if `name` is a declared entry field.
    #[must_use]
    pub fn is_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Returns true if `name` is a declared entry-scoped variable.
    #[must_use]
    pub fn is_entry_variable(&self, name: &str) -> bool {
        self.entry_locals.contains_key(name)
    }

    /// The declared entry fields.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// A function's body.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Arc<[Instruction]>> {
        self.functions.get(name)
    }

    /// The routine that formats entries of `entry_type`.
    ///
    /// Falls back to `default.type` when that function is defined.
    #[must_use]
    pub fn type_routine(&self, entry_type: &str) -> Option<Arc<str>> {
        let entry_type = entry_type.to_lowercase();
        self.type_routines
            .get(&entry_type)
            .filter(|name| self.functions.contains_key(*name))
            .cloned()
            .or_else(|| {
                self.functions
                    .get_key_value(DEFAULT_TYPE_ROUTINE)
                    .map(|(name, _)| name.clone())
            })
    }

    /// Fresh entry-scoped variables, all at their initial values.
    #[must_use]
    pub fn entry_locals(&self) -> im::HashMap<Arc<str>, Value> {
        self.entry_locals.clone()
    }

    /// Global variables at their initial values.
    #[must_use]
    pub fn globals(&self) -> HashMap<Arc<str>, Value> {
        self.globals.clone()
    }

    /// The per-entry routine.
    #[must_use]
    pub fn entry_routine(&self) -> &Arc<[Instruction]> {
        &self.entry_routine
    }

    /// Code run before the first entry.
    #[must_use]
    pub fn prologue(&self) -> &Arc<[Instruction]> {
        &self.prologue
    }

    /// Code run after the last entry.
    #[must_use]
    pub fn epilogue(&self) -> &Arc<[Instruction]> {
        &self.epilogue
    }
}

fn lower(name: &str) -> Arc<str> {
    name.to_lowercase().into()
}
