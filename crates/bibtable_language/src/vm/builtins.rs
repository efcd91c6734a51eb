//! Builtin functions of the style VM.
//!
//! Every builtin pops its operands (last argument first) and pushes its
//! result. Operand order in the docs below is push order.

#![allow(clippy::unnecessary_wraps)]

use bibtable_foundation::text::{purify, split_name_list, text_length};
use bibtable_foundation::{Error, ErrorKind, Result, ValueType};
use bibtable_storage::Person;
use tracing::info;

use super::Vm;
use crate::case::{CaseMode, change_case};
use crate::name_format::format_name;
use crate::value::Value;

/// A builtin function.
pub(crate) type Builtin = fn(&mut Vm<'_>) -> Result<()>;

/// Names of every builtin, in alphabetical order.
pub const BUILTIN_NAMES: &[&str] = &[
    "*",
    "+",
    "-",
    ":=",
    "<",
    "=",
    ">",
    "add.period$",
    "call.type$",
    "change.case$",
    "chr.to.int$",
    "cite$",
    "duplicate$",
    "empty$",
    "entry.max$",
    "format.name$",
    "global.max$",
    "if$",
    "int.to.chr$",
    "int.to.str$",
    "missing$",
    "newline$",
    "num.names$",
    "pop$",
    "preamble$",
    "purify$",
    "quote$",
    "skip$",
    "stack$",
    "substring$",
    "swap$",
    "text.length$",
    "text.prefix$",
    "top$",
    "type$",
    "warning$",
    "while$",
    "width$",
    "write$",
];

/// Upper bound style programs may assume for global string lengths.
const GLOBAL_MAX: i64 = 20_000;

/// Upper bound style programs may assume for entry string lengths.
const ENTRY_MAX: i64 = 250;

/// Returns true if `name` is a builtin.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    lookup(name).is_some()
}

pub(crate) fn lookup(name: &str) -> Option<Builtin> {
    let builtin: Builtin = match name {
        "+" => plus,
        "-" => minus,
        "*" => concat,
        ">" => greater,
        "<" => less,
        "=" => equals,
        ":=" => assign,
        "add.period$" => add_period_op,
        "call.type$" => call_type,
        "change.case$" => change_case_op,
        "chr.to.int$" => chr_to_int,
        "cite$" => cite,
        "duplicate$" => duplicate,
        "empty$" => empty,
        "entry.max$" => entry_max,
        "format.name$" => format_name_op,
        "global.max$" => global_max,
        "if$" => if_op,
        "int.to.chr$" => int_to_chr,
        "int.to.str$" => int_to_str,
        "missing$" => missing,
        "newline$" => newline,
        "num.names$" => num_names,
        "pop$" => pop,
        "preamble$" => preamble,
        "purify$" => purify_op,
        "quote$" => quote,
        "skip$" => skip,
        "stack$" => stack,
        "substring$" => substring_op,
        "swap$" => swap,
        "text.length$" => text_length_op,
        "text.prefix$" => text_prefix_op,
        "top$" => top,
        "type$" => entry_type,
        "warning$" => warning,
        "while$" => while_op,
        "width$" => width,
        "write$" => write,
        _ => return None,
    };
    Some(builtin)
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

// =============================================================================
// Arithmetic and Comparison
// =============================================================================

/// `a b +` pushes `a + b`.
fn plus(vm: &mut Vm<'_>) -> Result<()> {
    let b = vm.pop_int("+")?;
    let a = vm.pop_int("+")?;
    vm.push(Value::Int(a.wrapping_add(b)));
    Ok(())
}

/// `a b -` pushes `a - b`.
fn minus(vm: &mut Vm<'_>) -> Result<()> {
    let b = vm.pop_int("-")?;
    let a = vm.pop_int("-")?;
    vm.push(Value::Int(a.wrapping_sub(b)));
    Ok(())
}

/// `a b *` pushes the concatenation `ab`.
fn concat(vm: &mut Vm<'_>) -> Result<()> {
    let b = vm.pop_string("*")?;
    let a = vm.pop_string("*")?;
    vm.push(Value::from(format!("{a}{b}")));
    Ok(())
}

fn greater(vm: &mut Vm<'_>) -> Result<()> {
    let b = vm.pop_int(">")?;
    let a = vm.pop_int(">")?;
    vm.push(Value::from(a > b));
    Ok(())
}

fn less(vm: &mut Vm<'_>) -> Result<()> {
    let b = vm.pop_int("<")?;
    let a = vm.pop_int("<")?;
    vm.push(Value::from(a < b));
    Ok(())
}

/// Compares two integers or two strings.
fn equals(vm: &mut Vm<'_>) -> Result<()> {
    let b = vm.pop("=")?;
    let a = vm.pop("=")?;
    let equal = match (&a, &b) {
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Int(_), other) => {
            return Err(Error::type_mismatch("=", ValueType::Integer, other.value_type()));
        }
        _ => a.as_str("=")? == b.as_str("=")?,
    };
    vm.push(Value::from(equal));
    Ok(())
}

// =============================================================================
// Variables and Control Flow
// =============================================================================

/// `value 'var :=` assigns to a global or entry variable.
fn assign(vm: &mut Vm<'_>) -> Result<()> {
    let target = vm.pop(":=")?;
    let value = vm.pop(":=")?;
    let Value::Function(crate::value::Callable::Named(name)) = target else {
        return Err(Error::type_mismatch(":=", ValueType::Function, target.value_type()));
    };
    vm.assign(&name, value)
}

/// `cond then else if$` runs `then` when `cond` is positive.
fn if_op(vm: &mut Vm<'_>) -> Result<()> {
    let otherwise = vm.pop_callable("if$")?;
    let then = vm.pop_callable("if$")?;
    let cond = vm.pop_int("if$")?;
    vm.run_callable(if cond > 0 { &then } else { &otherwise })
}

/// `pred body while$` runs `body` while `pred` leaves a positive integer.
fn while_op(vm: &mut Vm<'_>) -> Result<()> {
    let body = vm.pop_callable("while$")?;
    let pred = vm.pop_callable("while$")?;
    loop {
        vm.run_callable(&pred)?;
        if vm.pop_int("while$")? <= 0 {
            return Ok(());
        }
        vm.run_callable(&body)?;
    }
}

fn skip(_vm: &mut Vm<'_>) -> Result<()> {
    Ok(())
}

/// Runs the routine registered for the current entry's type.
fn call_type(vm: &mut Vm<'_>) -> Result<()> {
    let entry = vm.current_entry("call.type$")?;
    let routine = vm
        .program()
        .type_routine(entry.entry_type())
        .ok_or_else(|| Error::new(ErrorKind::NoTypeRoutine(entry.entry_type().to_string())))?;
    vm.call(&routine)
}

// =============================================================================
// Stack
// =============================================================================

fn duplicate(vm: &mut Vm<'_>) -> Result<()> {
    let top = vm.pop("duplicate$")?;
    vm.push(top.clone());
    vm.push(top);
    Ok(())
}

fn swap(vm: &mut Vm<'_>) -> Result<()> {
    let b = vm.pop("swap$")?;
    let a = vm.pop("swap$")?;
    vm.push(b);
    vm.push(a);
    Ok(())
}

fn pop(vm: &mut Vm<'_>) -> Result<()> {
    vm.pop("pop$").map(drop)
}

fn top(vm: &mut Vm<'_>) -> Result<()> {
    let value = vm.pop("top$")?;
    info!(value = %value, "top$");
    Ok(())
}

/// Pops and logs the whole stack, top first.
fn stack(vm: &mut Vm<'_>) -> Result<()> {
    while let Ok(value) = vm.pop("stack$") {
        info!(value = %value, "stack$");
    }
    Ok(())
}

// =============================================================================
// Entry Access
// =============================================================================

fn cite(vm: &mut Vm<'_>) -> Result<()> {
    let key = Value::from(vm.current_key("cite$")?);
    vm.push(key);
    Ok(())
}

fn entry_type(vm: &mut Vm<'_>) -> Result<()> {
    let entry = vm.current_entry("type$")?;
    vm.push(Value::from(entry.entry_type()));
    Ok(())
}

/// Pushes 1 for a missing field or blank string, 0 otherwise.
fn empty(vm: &mut Vm<'_>) -> Result<()> {
    let blank = match vm.pop("empty$")? {
        Value::Missing => true,
        Value::String(s) => s.trim().is_empty(),
        other => {
            return Err(Error::type_mismatch("empty$", ValueType::String, other.value_type()));
        }
    };
    vm.push(Value::from(blank));
    Ok(())
}

fn missing(vm: &mut Vm<'_>) -> Result<()> {
    let value = vm.pop("missing$")?;
    vm.push(Value::from(value.is_missing()));
    Ok(())
}

fn preamble(vm: &mut Vm<'_>) -> Result<()> {
    let text = vm.preamble();
    vm.push(Value::from(text));
    Ok(())
}

// =============================================================================
// Strings
// =============================================================================

fn add_period_op(vm: &mut Vm<'_>) -> Result<()> {
    let text = vm.pop_string("add.period$")?;
    vm.push(Value::from(add_period(&text)));
    Ok(())
}

/// `text mode change.case$`; an unknown mode warns and leaves `text` alone.
fn change_case_op(vm: &mut Vm<'_>) -> Result<()> {
    let mode = vm.pop_string("change.case$")?;
    let text = vm.pop_string("change.case$")?;
    match CaseMode::parse(&mode) {
        Some(mode) => vm.push(Value::from(change_case(&text, mode))),
        None => {
            vm.warn(format!("{mode} is an illegal case-conversion string"));
            vm.push(Value::String(text));
        }
    }
    Ok(())
}

/// `names n pattern format.name$` formats the n-th name (1-based).
fn format_name_op(vm: &mut Vm<'_>) -> Result<()> {
    let pattern = vm.pop_string("format.name$")?;
    let index = vm.pop_int("format.name$")?;
    let names = vm.pop_string("format.name$")?;

    let list = split_name_list(&names);
    let name = usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| list.get(i))
        .ok_or_else(|| {
            Error::new(ErrorKind::NameIndexOutOfRange {
                index,
                count: list.len(),
            })
        })?;
    let person = Person::parse(name)?;
    vm.push(Value::from(format_name(&person, &pattern)));
    Ok(())
}

fn num_names(vm: &mut Vm<'_>) -> Result<()> {
    let names = vm.pop_string("num.names$")?;
    vm.push(Value::Int(count(split_name_list(&names).len())));
    Ok(())
}

fn int_to_str(vm: &mut Vm<'_>) -> Result<()> {
    let n = vm.pop_int("int.to.str$")?;
    vm.push(Value::from(n.to_string()));
    Ok(())
}

/// Pushes the code point of a one-character string.
fn chr_to_int(vm: &mut Vm<'_>) -> Result<()> {
    let text = vm.pop_string("chr.to.int$")?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => vm.push(Value::Int(i64::from(u32::from(c)))),
        _ => {
            vm.warn(format!("\"{text}\" isn't a single character"));
            vm.push(Value::Int(0));
        }
    }
    Ok(())
}

fn int_to_chr(vm: &mut Vm<'_>) -> Result<()> {
    let n = vm.pop_int("int.to.chr$")?;
    match u32::try_from(n).ok().and_then(char::from_u32) {
        Some(c) => vm.push(Value::from(c.to_string())),
        None => {
            vm.warn(format!("{n} isn't valid character code"));
            vm.push(Value::from(""));
        }
    }
    Ok(())
}

/// `text start len substring$`.
fn substring_op(vm: &mut Vm<'_>) -> Result<()> {
    let len = vm.pop_int("substring$")?;
    let start = vm.pop_int("substring$")?;
    let text = vm.pop_string("substring$")?;
    vm.push(Value::from(substring(&text, start, len)?));
    Ok(())
}

fn text_length_op(vm: &mut Vm<'_>) -> Result<()> {
    let text = vm.pop_string("text.length$")?;
    vm.push(Value::Int(count(text_length(&text))));
    Ok(())
}

/// Approximates width by counting visible characters.
fn width(vm: &mut Vm<'_>) -> Result<()> {
    let text = vm.pop_string("width$")?;
    vm.push(Value::Int(count(text_length(&text))));
    Ok(())
}

fn text_prefix_op(vm: &mut Vm<'_>) -> Result<()> {
    let len = vm.pop_int("text.prefix$")?;
    let text = vm.pop_string("text.prefix$")?;
    vm.push(Value::from(text_prefix(&text, len)));
    Ok(())
}

fn purify_op(vm: &mut Vm<'_>) -> Result<()> {
    let text = vm.pop_string("purify$")?;
    vm.push(Value::from(purify(&text)));
    Ok(())
}

fn quote(vm: &mut Vm<'_>) -> Result<()> {
    vm.push(Value::from("\""));
    Ok(())
}

fn global_max(vm: &mut Vm<'_>) -> Result<()> {
    vm.push(Value::Int(GLOBAL_MAX));
    Ok(())
}

fn entry_max(vm: &mut Vm<'_>) -> Result<()> {
    vm.push(Value::Int(ENTRY_MAX));
    Ok(())
}

// =============================================================================
// Output
// =============================================================================

fn write(vm: &mut Vm<'_>) -> Result<()> {
    let text = vm.pop_string("write$")?;
    vm.write(&text);
    Ok(())
}

fn newline(vm: &mut Vm<'_>) -> Result<()> {
    vm.write("\n");
    Ok(())
}

fn warning(vm: &mut Vm<'_>) -> Result<()> {
    let text = vm.pop_string("warning$")?;
    vm.warn(text.to_string());
    Ok(())
}

// =============================================================================
// String Helpers
// =============================================================================

/// Appends a period unless the text already ends in `.`, `?`, or `!`
/// (ignoring closing braces). Unmatched trailing `}` are dropped first.
pub(crate) fn add_period(text: &str) -> String {
    let visible = text.trim_end_matches('}');
    if visible.is_empty() || visible.ends_with(|c| matches!(c, '.' | '?' | '!')) {
        return text.to_string();
    }
    let opens = text.chars().filter(|&c| c == '{').count();
    let closes = text.chars().filter(|&c| c == '}').count();
    let mut out = text.to_string();
    let mut excess = closes.saturating_sub(opens);
    while excess > 0 && out.ends_with('}') {
        out.pop();
        excess -= 1;
    }
    out.push('.');
    out
}

/// Characters `start..start + len` of `text`, counting from 1.
///
/// A negative `start` counts back from the end (`-1` is the last character)
/// and the window still reads forward. The window is clipped to the text.
pub(crate) fn substring(text: &str, start: i64, len: i64) -> Result<String> {
    if start == 0 {
        return Err(Error::new(ErrorKind::SubstringStartZero));
    }
    if len <= 0 {
        return Ok(String::new());
    }
    let chars: Vec<char> = text.chars().collect();
    let n = count(chars.len());
    let begin = if start > 0 { start - 1 } else { n.saturating_add(start) };
    let end = begin.saturating_add(len);
    let lo = usize::try_from(begin.clamp(0, n)).unwrap_or(0);
    let hi = usize::try_from(end.clamp(0, n)).unwrap_or(0);
    Ok(chars[lo..hi].iter().collect())
}

/// The first `len` non-brace characters of `text`, with any braces left
/// open closed again.
pub(crate) fn text_prefix(text: &str, len: i64) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    let mut taken = 0i64;
    for c in text.chars() {
        if taken >= len {
            break;
        }
        match c {
            '{' => {
                depth += 1;
                out.push(c);
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    out.push(c);
                }
            }
            _ => {
                taken += 1;
                out.push(c);
            }
        }
    }
    out.extend(std::iter::repeat_n('}', depth));
    out
}
