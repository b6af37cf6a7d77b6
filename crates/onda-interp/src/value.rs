//! Runtime values.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::natives::Native;
use crate::registry::CallableId;

/// Shared interior of a list value.
pub type ListRef = Rc<RefCell<Vec<Value>>>;
/// Shared interior of a string value.
pub type StrRef = Rc<RefCell<String>>;
/// Shared interior of an object value; members keep insertion order.
pub type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;

/// A runtime value in the interpreter.
///
/// `clone` is shallow: string, list, and object interiors are shared, which
/// is what lets references alias container internals. Crossing an ownership
/// boundary (storing into a variable, binding an argument, dereferencing)
/// goes through [`Value::deep_copy`] instead.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value
    Void,
    /// Integer
    Int(i64),
    /// Float
    Flt(f64),
    /// String
    Str(StrRef),
    /// List of values
    List(ListRef),
    /// Object with named members
    Object(ObjectRef),
    /// User-defined function, identified by its registry id
    Function(CallableId),
    /// Native function, identified by its table index
    Native(Native),
}

/// The kind of a value, used for dispatch through the kind table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Void,
    Int,
    Flt,
    Str,
    List,
    Object,
    Function,
    Native,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Void => "Void",
            ValueKind::Int => "Int",
            ValueKind::Flt => "Flt",
            ValueKind::Str => "Str",
            ValueKind::List => "List",
            ValueKind::Object => "Object",
            ValueKind::Function => "Function",
            ValueKind::Native => "Native",
        }
    }
}

impl Value {
    pub fn str(s: impl Into<String>) -> Value {
        Value::Str(Rc::new(RefCell::new(s.into())))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn object(members: IndexMap<String, Value>) -> Value {
        Value::Object(Rc::new(RefCell::new(members)))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Void => ValueKind::Void,
            Value::Int(_) => ValueKind::Int,
            Value::Flt(_) => ValueKind::Flt,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
            Value::Function(_) => ValueKind::Function,
            Value::Native(_) => ValueKind::Native,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// An independent copy: container interiors are duplicated recursively.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Str(s) => Value::str(s.borrow().clone()),
            Value::List(items) => {
                Value::list(items.borrow().iter().map(Value::deep_copy).collect())
            }
            Value::Object(members) => Value::object(
                members
                    .borrow()
                    .iter()
                    .map(|(name, value)| (name.clone(), value.deep_copy()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    pub fn is_true(&self) -> bool {
        crate::kinds::ops_for(self.kind()).is_true(self)
    }

    pub fn is_equal(&self, other: &Value) -> bool {
        crate::kinds::ops_for(self.kind()).is_equal(self, other)
    }

    /// Text representation through the kind table.
    pub fn represent(&self) -> String {
        crate::kinds::ops_for(self.kind()).represent(self)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.represent())
    }
}

/// Format a float the way the language prints it: always with a decimal
/// point, so Int and Flt results stay distinguishable.
pub(crate) fn format_flt(value: f64) -> String {
    if value.is_finite() && value == value.trunc() && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_copy_of_list_is_independent() {
        let original = Value::list(vec![Value::Int(1), Value::str("x")]);
        let copy = original.deep_copy();
        if let Value::List(items) = &copy {
            items.borrow_mut()[0] = Value::Int(9);
        }
        if let Value::List(items) = &original {
            assert!(items.borrow()[0].is_equal(&Value::Int(1)));
        }
    }

    #[test]
    fn deep_copy_reaches_nested_containers() {
        let inner = Value::list(vec![Value::Int(1)]);
        let original = Value::list(vec![inner]);
        let copy = original.deep_copy();
        if let Value::List(items) = &copy {
            if let Value::List(inner) = &items.borrow()[0] {
                inner.borrow_mut().push(Value::Int(2));
            }
        }
        if let Value::List(items) = &original {
            if let Value::List(inner) = &items.borrow()[0] {
                assert_eq!(inner.borrow().len(), 1);
            }
        }
    }

    #[test]
    fn shallow_clone_shares_the_interior() {
        let original = Value::list(vec![Value::Int(1)]);
        let alias = original.clone();
        if let Value::List(items) = &alias {
            items.borrow_mut().push(Value::Int(2));
        }
        if let Value::List(items) = &original {
            assert_eq!(items.borrow().len(), 2);
        }
    }

    #[test]
    fn float_formatting_keeps_the_point() {
        assert_eq!(format_flt(2.0), "2.0");
        assert_eq!(format_flt(0.5), "0.5");
    }
}
