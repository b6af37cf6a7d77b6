//! Operations on Void.

use super::KindOps;
use crate::value::{Value, ValueKind};

pub struct VoidOps;

impl KindOps for VoidOps {
    fn kind(&self) -> ValueKind {
        ValueKind::Void
    }

    fn represent(&self, _subject: &Value) -> String {
        "Void".to_string()
    }

    fn is_true(&self, _subject: &Value) -> bool {
        false
    }

    fn is_equal(&self, _subject: &Value, other: &Value) -> bool {
        matches!(other, Value::Void)
    }
}
