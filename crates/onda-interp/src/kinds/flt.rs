//! Operations on Flt.

use std::cmp::Ordering;

use super::int::flt_pow;
use super::{KindOps, OpError, OpResult};
use crate::value::{format_flt, Value, ValueKind};

pub struct FltOps;

fn flt_of(subject: &Value) -> f64 {
    match subject {
        Value::Flt(f) => *f,
        _ => unreachable!("FltOps dispatched on a non-Flt"),
    }
}

/// The right operand as a number, if it is one.
fn numeric(other: &Value) -> Option<f64> {
    match other {
        Value::Int(n) => Some(*n as f64),
        Value::Flt(f) => Some(*f),
        _ => None,
    }
}

impl KindOps for FltOps {
    fn kind(&self) -> ValueKind {
        ValueKind::Flt
    }

    fn represent(&self, subject: &Value) -> String {
        format_flt(flt_of(subject))
    }

    fn is_true(&self, subject: &Value) -> bool {
        flt_of(subject) != 0.0
    }

    fn is_equal(&self, subject: &Value, other: &Value) -> bool {
        numeric(other).is_some_and(|n| flt_of(subject) == n)
    }

    fn order(&self, subject: &Value, other: &Value) -> Option<Ordering> {
        flt_of(subject).partial_cmp(&numeric(other)?)
    }

    /// Truncates toward zero.
    fn as_int(&self, subject: &Value) -> OpResult {
        Ok(Value::Int(flt_of(subject) as i64))
    }

    fn as_flt(&self, subject: &Value) -> OpResult {
        Ok(subject.clone())
    }

    fn as_str(&self, subject: &Value) -> OpResult {
        Ok(Value::str(format_flt(flt_of(subject))))
    }

    fn add(&self, subject: &Value, other: &Value) -> OpResult {
        match numeric(other) {
            Some(n) => Ok(Value::Flt(flt_of(subject) + n)),
            None => Err(OpError::Unsupported),
        }
    }

    fn sub(&self, subject: &Value, other: &Value) -> OpResult {
        match numeric(other) {
            Some(n) => Ok(Value::Flt(flt_of(subject) - n)),
            None => Err(OpError::Unsupported),
        }
    }

    fn mul(&self, subject: &Value, other: &Value) -> OpResult {
        match numeric(other) {
            Some(n) => Ok(Value::Flt(flt_of(subject) * n)),
            None => Err(OpError::Unsupported),
        }
    }

    fn div(&self, subject: &Value, other: &Value) -> OpResult {
        match numeric(other) {
            Some(n) if n == 0.0 => Err(OpError::ZeroDivision),
            Some(n) => Ok(Value::Flt(flt_of(subject) / n)),
            None => Err(OpError::Unsupported),
        }
    }

    fn fdiv(&self, subject: &Value, other: &Value) -> OpResult {
        match numeric(other) {
            Some(n) if n == 0.0 => Err(OpError::ZeroDivision),
            Some(n) => Ok(Value::Flt((flt_of(subject) / n).floor())),
            None => Err(OpError::Unsupported),
        }
    }

    fn rem(&self, subject: &Value, other: &Value) -> OpResult {
        match numeric(other) {
            Some(n) if n == 0.0 => Err(OpError::ZeroDivision),
            Some(n) => Ok(Value::Flt(flt_of(subject) % n)),
            None => Err(OpError::Unsupported),
        }
    }

    fn pow(&self, subject: &Value, other: &Value) -> OpResult {
        match numeric(other) {
            Some(n) => flt_pow(flt_of(subject), n),
            None => Err(OpError::Unsupported),
        }
    }

    fn negate(&self, subject: &Value) -> OpResult {
        Ok(Value::Flt(-flt_of(subject)))
    }
}
