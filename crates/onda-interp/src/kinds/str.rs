//! Operations on Str.
//!
//! Strings are sequences of characters; indices and widths count
//! characters, not bytes. Indexing yields a width-1 string view, never a
//! bare character: characters are not value slots.

use std::cmp::Ordering;

use super::{resolve_index, resolve_range, KindOps, OpError, OpResult};
use crate::reference::Reference;
use crate::value::{StrRef, Value, ValueKind};

pub struct StrOps;

fn str_of(subject: &Value) -> &StrRef {
    match subject {
        Value::Str(s) => s,
        _ => unreachable!("StrOps dispatched on a non-Str"),
    }
}

impl KindOps for StrOps {
    fn kind(&self) -> ValueKind {
        ValueKind::Str
    }

    fn represent(&self, subject: &Value) -> String {
        str_of(subject).borrow().clone()
    }

    fn is_true(&self, subject: &Value) -> bool {
        !str_of(subject).borrow().is_empty()
    }

    fn is_equal(&self, subject: &Value, other: &Value) -> bool {
        match other {
            Value::Str(o) => *str_of(subject).borrow() == *o.borrow(),
            _ => false,
        }
    }

    /// Strings order by length.
    fn order(&self, subject: &Value, other: &Value) -> Option<Ordering> {
        match other {
            Value::Str(o) => Some(
                str_of(subject)
                    .borrow()
                    .chars()
                    .count()
                    .cmp(&o.borrow().chars().count()),
            ),
            _ => None,
        }
    }

    fn as_int(&self, subject: &Value) -> OpResult {
        str_of(subject)
            .borrow()
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| OpError::Unsupported)
    }

    fn as_flt(&self, subject: &Value) -> OpResult {
        str_of(subject)
            .borrow()
            .trim()
            .parse::<f64>()
            .map(Value::Flt)
            .map_err(|_| OpError::Unsupported)
    }

    fn as_str(&self, subject: &Value) -> OpResult {
        Ok(subject.deep_copy())
    }

    fn add(&self, subject: &Value, other: &Value) -> OpResult {
        match other {
            Value::Str(o) => {
                let mut joined = str_of(subject).borrow().clone();
                joined.push_str(&o.borrow());
                Ok(Value::str(joined))
            }
            _ => Err(OpError::Unsupported),
        }
    }

    /// Repetition; negative counts clamp to zero.
    fn mul(&self, subject: &Value, other: &Value) -> OpResult {
        match other {
            Value::Int(n) => {
                let count = (*n).max(0) as usize;
                Ok(Value::str(str_of(subject).borrow().repeat(count)))
            }
            _ => Err(OpError::Unsupported),
        }
    }

    fn length(&self, subject: &Value) -> Option<usize> {
        Some(str_of(subject).borrow().chars().count())
    }

    fn refer_to_index(&self, subject: &Value, index: i64) -> Result<Reference, OpError> {
        let string = str_of(subject);
        let width = string.borrow().chars().count();
        let start = resolve_index(index, width)?;
        Ok(Reference::StrView {
            string: string.clone(),
            start,
            width: 1,
        })
    }

    fn refer_to_range(
        &self,
        subject: &Value,
        begin: Option<i64>,
        end: Option<i64>,
    ) -> Result<Reference, OpError> {
        let string = str_of(subject);
        let full = string.borrow().chars().count();
        let (start, width) = resolve_range(begin, end, full)?;
        Ok(Reference::StrView {
            string: string.clone(),
            start,
            width,
        })
    }
}
