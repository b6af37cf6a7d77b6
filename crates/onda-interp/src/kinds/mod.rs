// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Per-kind operation dispatch.
//!
//! Every data kind implements [`KindOps`]; the trait's default methods
//! report the operation as unsupported, which the evaluator turns into a
//! Type error at the failing node — the "missing table entry means a typed
//! error, never a crash" contract.
//!
//! Binary operators are asymmetric: the left operand's kind is consulted
//! and handles mixed-kind arithmetic itself, delegating to the right kind's
//! implementation where the operation is commutative (`Int * List` runs as
//! `List * Int`).

mod flt;
mod function;
mod int;
mod list;
mod native;
mod object;
mod str;
mod void;

use std::cmp::Ordering;

use crate::reference::Reference;
use crate::value::{Value, ValueKind};

/// Why a kind operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpError {
    /// The kind does not define this operation.
    Unsupported,
    ZeroDivision,
    /// The operation produced an unreal number (NaN).
    UnrealNumber,
    /// Index or slice bound outside the container's current width.
    OutOfRange,
}

pub type OpResult = Result<Value, OpError>;

/// Everything a value kind can define. Any unimplemented method keeps its
/// default, reporting the operation as unsupported for that kind.
pub trait KindOps {
    fn kind(&self) -> ValueKind;

    fn represent(&self, subject: &Value) -> String;
    fn is_true(&self, subject: &Value) -> bool;
    fn is_equal(&self, subject: &Value, other: &Value) -> bool;

    /// Tri-state ordering: `None` means the operands are incomparable,
    /// which the evaluator reports as a Type error.
    fn order(&self, _subject: &Value, _other: &Value) -> Option<Ordering> {
        None
    }

    fn as_int(&self, _subject: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn as_flt(&self, _subject: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn as_str(&self, _subject: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }

    fn add(&self, _subject: &Value, _other: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn sub(&self, _subject: &Value, _other: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn mul(&self, _subject: &Value, _other: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn div(&self, _subject: &Value, _other: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn fdiv(&self, _subject: &Value, _other: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn rem(&self, _subject: &Value, _other: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn pow(&self, _subject: &Value, _other: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }
    fn negate(&self, _subject: &Value) -> OpResult {
        Err(OpError::Unsupported)
    }

    /// Element count for `len` and view construction.
    fn length(&self, _subject: &Value) -> Option<usize> {
        None
    }

    fn refer_to_index(&self, _subject: &Value, _index: i64) -> Result<Reference, OpError> {
        Err(OpError::Unsupported)
    }
    fn refer_to_range(
        &self,
        _subject: &Value,
        _begin: Option<i64>,
        _end: Option<i64>,
    ) -> Result<Reference, OpError> {
        Err(OpError::Unsupported)
    }

    fn member_exists(&self, _subject: &Value, _name: &str) -> bool {
        false
    }
    fn refer_to_member(&self, _subject: &Value, _name: &str) -> Option<Reference> {
        None
    }
}

/// Look up the operation table for a kind.
pub fn ops_for(kind: ValueKind) -> &'static dyn KindOps {
    match kind {
        ValueKind::Void => &void::VoidOps,
        ValueKind::Int => &int::IntOps,
        ValueKind::Flt => &flt::FltOps,
        ValueKind::Str => &str::StrOps,
        ValueKind::List => &list::ListOps,
        ValueKind::Object => &object::ObjectOps,
        ValueKind::Function => &function::FunctionOps,
        ValueKind::Native => &native::NativeOps,
    }
}

/// Resolve a possibly-negative index against the current width.
/// `-1` names the last element; the result must land in `[0, width)`.
pub(crate) fn resolve_index(index: i64, width: usize) -> Result<usize, OpError> {
    let adjusted = if index < 0 {
        index + width as i64
    } else {
        index
    };
    if adjusted < 0 || adjusted >= width as i64 {
        return Err(OpError::OutOfRange);
    }
    Ok(adjusted as usize)
}

/// Resolve possibly-negative, possibly-omitted slice bounds into a
/// half-open `(first, width)` run. An omitted begin is 0, an omitted end is
/// the container width; the resolved run must satisfy
/// `0 <= first <= end <= width`.
pub(crate) fn resolve_range(
    begin: Option<i64>,
    end: Option<i64>,
    width: usize,
) -> Result<(usize, usize), OpError> {
    let adjust = |bound: i64| {
        if bound < 0 {
            bound + width as i64
        } else {
            bound
        }
    };
    let first = begin.map(adjust).unwrap_or(0);
    let last = end.map(adjust).unwrap_or(width as i64);
    if first < 0 || last < first || last > width as i64 {
        return Err(OpError::OutOfRange);
    }
    Ok((first as usize, (last - first) as usize))
}

/// How an element renders inside a list or object literal: strings are
/// quoted there, unlike at the top level.
pub(crate) fn represent_element(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("\"{}\"", s.borrow()),
        other => other.represent(),
    }
}
