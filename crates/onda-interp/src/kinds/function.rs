//! Operations on Function values.

use super::{KindOps, OpResult};
use crate::value::{Value, ValueKind};

pub struct FunctionOps;

impl KindOps for FunctionOps {
    fn kind(&self) -> ValueKind {
        ValueKind::Function
    }

    fn represent(&self, subject: &Value) -> String {
        match subject {
            Value::Function(id) => format!("<function {}>", id.0),
            _ => unreachable!("FunctionOps dispatched on a non-Function"),
        }
    }

    fn is_true(&self, _subject: &Value) -> bool {
        true
    }

    fn is_equal(&self, subject: &Value, other: &Value) -> bool {
        match (subject, other) {
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }

    fn as_str(&self, subject: &Value) -> OpResult {
        Ok(Value::str(self.represent(subject)))
    }
}
