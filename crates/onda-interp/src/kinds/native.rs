//! Operations on Native function values.

use super::{KindOps, OpResult};
use crate::value::{Value, ValueKind};

pub struct NativeOps;

impl KindOps for NativeOps {
    fn kind(&self) -> ValueKind {
        ValueKind::Native
    }

    fn represent(&self, subject: &Value) -> String {
        match subject {
            Value::Native(native) => format!("<native {}>", native.name()),
            _ => unreachable!("NativeOps dispatched on a non-Native"),
        }
    }

    fn is_true(&self, _subject: &Value) -> bool {
        true
    }

    fn is_equal(&self, subject: &Value, other: &Value) -> bool {
        match (subject, other) {
            (Value::Native(a), Value::Native(b)) => a == b,
            _ => false,
        }
    }

    fn as_str(&self, subject: &Value) -> OpResult {
        Ok(Value::str(self.represent(subject)))
    }
}
