// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! References: non-owning views into container internals.
//!
//! Index, slice, and member expressions evaluate to a `Reference` when used
//! as assignment targets, so containers are never copied just to be written
//! through. A reference holds the container's shared interior plus a
//! resolved position, never a raw pointer; it stays valid however the
//! variable that produced it moves around.

use crate::value::{ListRef, ObjectRef, StrRef, Value};

/// A resolved place inside a container.
#[derive(Debug, Clone)]
pub enum Reference {
    /// Exactly one list slot.
    Elem { list: ListRef, index: usize },
    /// A named object member.
    Member { object: ObjectRef, name: String },
    /// A contiguous run of list elements.
    ListView {
        list: ListRef,
        start: usize,
        width: usize,
    },
    /// A contiguous run of characters.
    StrView {
        string: StrRef,
        start: usize,
        width: usize,
    },
}

impl Reference {
    /// The single exit point that turns a reference into an owned value.
    ///
    /// Mandatory before a referenced value crosses a scope boundary: the
    /// result is a deep copy (or a fresh allocation for views) with no ties
    /// to the container.
    pub fn dereference(&self) -> Value {
        match self {
            Reference::Elem { list, index } => list.borrow()[*index].deep_copy(),
            Reference::Member { object, name } => object
                .borrow()
                .get(name)
                .map(Value::deep_copy)
                .unwrap_or(Value::Void),
            Reference::ListView { list, start, width } => Value::list(
                list.borrow()[*start..*start + *width]
                    .iter()
                    .map(Value::deep_copy)
                    .collect(),
            ),
            Reference::StrView {
                string,
                start,
                width,
            } => {
                let s = string.borrow();
                Value::str(s.chars().skip(*start).take(*width).collect::<String>())
            }
        }
    }

    /// Read the referent without breaking the aliasing: slot references
    /// hand out a shallow clone that still shares container interiors.
    /// Used when a reference is an intermediate step of a larger place
    /// expression (`a[0][1] = x`). Views have no single slot to share and
    /// fall back to a copy.
    pub fn peek(&self) -> Value {
        match self {
            Reference::Elem { list, index } => list.borrow()[*index].clone(),
            Reference::Member { object, name } => {
                object.borrow().get(name).cloned().unwrap_or(Value::Void)
            }
            view => view.dereference(),
        }
    }

    /// Whether `value` may be assigned through this reference.
    ///
    /// Slot references accept any data value; views additionally require the
    /// value's length to equal the view's width (a slice assignment cannot
    /// resize the container).
    pub fn can_assign(&self, value: &Value) -> bool {
        match self {
            Reference::Elem { .. } | Reference::Member { .. } => true,
            Reference::ListView { width, .. } => match value {
                Value::List(items) => items.borrow().len() == *width,
                _ => false,
            },
            Reference::StrView { width, .. } => match value {
                Value::Str(s) => s.borrow().chars().count() == *width,
                _ => false,
            },
        }
    }

    /// Assign `value` through this reference. The caller must have checked
    /// [`Reference::can_assign`]; the value is deep-copied in.
    pub fn assign(&self, value: &Value) {
        match self {
            Reference::Elem { list, index } => {
                list.borrow_mut()[*index] = value.deep_copy();
            }
            Reference::Member { object, name } => {
                object.borrow_mut().insert(name.clone(), value.deep_copy());
            }
            Reference::ListView { list, start, width } => {
                let source = match value {
                    Value::List(items) => items,
                    _ => unreachable!("can_assign admits only lists into list views"),
                };
                let source = source.borrow();
                let mut target = list.borrow_mut();
                for i in 0..*width {
                    target[start + i] = source[i].deep_copy();
                }
            }
            Reference::StrView {
                string,
                start,
                width,
            } => {
                let source = match value {
                    Value::Str(s) => s.borrow().clone(),
                    _ => unreachable!("can_assign admits only strings into string views"),
                };
                let mut target = string.borrow_mut();
                let mut chars: Vec<char> = target.chars().collect();
                for (i, c) in source.chars().enumerate() {
                    chars[start + i] = c;
                }
                *target = chars.into_iter().collect();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_list() -> ListRef {
        Rc::new(RefCell::new(vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(3),
            Value::Int(4),
        ]))
    }

    #[test]
    fn dereference_is_a_deep_copy() {
        let list = sample_list();
        let reference = Reference::Elem {
            list: list.clone(),
            index: 0,
        };
        let out = reference.dereference();
        list.borrow_mut()[0] = Value::Int(9);
        assert!(out.is_equal(&Value::Int(1)));
    }

    #[test]
    fn list_view_assignment_requires_matching_width() {
        let list = sample_list();
        let view = Reference::ListView {
            list: list.clone(),
            start: 1,
            width: 2,
        };
        assert!(!view.can_assign(&Value::list(vec![Value::Int(9)])));
        let replacement = Value::list(vec![Value::Int(9), Value::Int(9)]);
        assert!(view.can_assign(&replacement));
        view.assign(&replacement);
        let items = list.borrow();
        let shown: Vec<String> = items.iter().map(|v| v.represent()).collect();
        assert_eq!(shown, ["1", "9", "9", "4"]);
    }

    #[test]
    fn str_view_assignment_replaces_characters_in_place() {
        let string: StrRef = Rc::new(RefCell::new("abcd".to_string()));
        let view = Reference::StrView {
            string: string.clone(),
            start: 1,
            width: 2,
        };
        assert!(!view.can_assign(&Value::str("x")));
        view.assign(&Value::str("xy"));
        assert_eq!(&*string.borrow(), "axyd");
    }

    #[test]
    fn member_assignment_creates_or_replaces() {
        let object: ObjectRef = Rc::new(RefCell::new(indexmap::IndexMap::new()));
        let member = Reference::Member {
            object: object.clone(),
            name: "a".to_string(),
        };
        member.assign(&Value::Int(5));
        assert!(object.borrow()["a"].is_equal(&Value::Int(5)));
    }
}
