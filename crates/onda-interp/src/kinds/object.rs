//! Operations on Object.

use super::{represent_element, KindOps, OpResult};
use crate::reference::Reference;
use crate::value::{ObjectRef, Value, ValueKind};

pub struct ObjectOps;

fn object_of(subject: &Value) -> &ObjectRef {
    match subject {
        Value::Object(members) => members,
        _ => unreachable!("ObjectOps dispatched on a non-Object"),
    }
}

impl KindOps for ObjectOps {
    fn kind(&self) -> ValueKind {
        ValueKind::Object
    }

    fn represent(&self, subject: &Value) -> String {
        let members = object_of(subject).borrow();
        let shown: Vec<String> = members
            .iter()
            .map(|(name, value)| format!("{}: {}", name, represent_element(value)))
            .collect();
        format!("{{{}}}", shown.join(", "))
    }

    fn is_true(&self, subject: &Value) -> bool {
        !object_of(subject).borrow().is_empty()
    }

    /// Objects are equal when they hold the same members, in any order.
    fn is_equal(&self, subject: &Value, other: &Value) -> bool {
        match other {
            Value::Object(o) => {
                let left = object_of(subject).borrow();
                let right = o.borrow();
                left.len() == right.len()
                    && left
                        .iter()
                        .all(|(name, value)| right.get(name).is_some_and(|r| value.is_equal(r)))
            }
            _ => false,
        }
    }

    fn as_str(&self, subject: &Value) -> OpResult {
        Ok(Value::str(self.represent(subject)))
    }

    fn length(&self, subject: &Value) -> Option<usize> {
        Some(object_of(subject).borrow().len())
    }

    fn member_exists(&self, subject: &Value, name: &str) -> bool {
        object_of(subject).borrow().contains_key(name)
    }

    fn refer_to_member(&self, subject: &Value, name: &str) -> Option<Reference> {
        let members = object_of(subject);
        if !members.borrow().contains_key(name) {
            return None;
        }
        Some(Reference::Member {
            object: members.clone(),
            name: name.to_string(),
        })
    }
}
