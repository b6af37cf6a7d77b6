//! Operations on List.

use std::cmp::Ordering;

use super::{represent_element, resolve_index, resolve_range, KindOps, OpError, OpResult};
use crate::reference::Reference;
use crate::value::{ListRef, Value, ValueKind};

pub struct ListOps;

fn list_of(subject: &Value) -> &ListRef {
    match subject {
        Value::List(items) => items,
        _ => unreachable!("ListOps dispatched on a non-List"),
    }
}

impl KindOps for ListOps {
    fn kind(&self) -> ValueKind {
        ValueKind::List
    }

    fn represent(&self, subject: &Value) -> String {
        let items = list_of(subject).borrow();
        let shown: Vec<String> = items.iter().map(represent_element).collect();
        format!("[{}]", shown.join(", "))
    }

    fn is_true(&self, subject: &Value) -> bool {
        !list_of(subject).borrow().is_empty()
    }

    fn is_equal(&self, subject: &Value, other: &Value) -> bool {
        match other {
            Value::List(o) => {
                let left = list_of(subject).borrow();
                let right = o.borrow();
                left.len() == right.len()
                    && left.iter().zip(right.iter()).all(|(a, b)| a.is_equal(b))
            }
            _ => false,
        }
    }

    /// Lists order by element count.
    fn order(&self, subject: &Value, other: &Value) -> Option<Ordering> {
        match other {
            Value::List(o) => Some(list_of(subject).borrow().len().cmp(&o.borrow().len())),
            _ => None,
        }
    }

    fn as_str(&self, subject: &Value) -> OpResult {
        Ok(Value::str(self.represent(subject)))
    }

    /// Concatenation.
    fn add(&self, subject: &Value, other: &Value) -> OpResult {
        match other {
            Value::List(o) => {
                let mut joined: Vec<Value> =
                    list_of(subject).borrow().iter().map(Value::deep_copy).collect();
                joined.extend(o.borrow().iter().map(Value::deep_copy));
                Ok(Value::list(joined))
            }
            _ => Err(OpError::Unsupported),
        }
    }

    /// Repetition; negative counts clamp to zero.
    fn mul(&self, subject: &Value, other: &Value) -> OpResult {
        match other {
            Value::Int(n) => {
                let count = (*n).max(0) as usize;
                let items = list_of(subject).borrow();
                let mut repeated = Vec::with_capacity(items.len() * count);
                for _ in 0..count {
                    repeated.extend(items.iter().map(Value::deep_copy));
                }
                Ok(Value::list(repeated))
            }
            _ => Err(OpError::Unsupported),
        }
    }

    fn length(&self, subject: &Value) -> Option<usize> {
        Some(list_of(subject).borrow().len())
    }

    fn refer_to_index(&self, subject: &Value, index: i64) -> Result<Reference, OpError> {
        let list = list_of(subject);
        let width = list.borrow().len();
        let index = resolve_index(index, width)?;
        Ok(Reference::Elem {
            list: list.clone(),
            index,
        })
    }

    fn refer_to_range(
        &self,
        subject: &Value,
        begin: Option<i64>,
        end: Option<i64>,
    ) -> Result<Reference, OpError> {
        let list = list_of(subject);
        let full = list.borrow().len();
        let (start, width) = resolve_range(begin, end, full)?;
        Ok(Reference::ListView {
            list: list.clone(),
            start,
            width,
        })
    }
}
