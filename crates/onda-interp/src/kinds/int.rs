//! Operations on Int.

use std::cmp::Ordering;

use super::{ops_for, KindOps, OpError, OpResult};
use crate::value::{Value, ValueKind};

pub struct IntOps;

fn int_of(subject: &Value) -> i64 {
    match subject {
        Value::Int(n) => *n,
        _ => unreachable!("IntOps dispatched on a non-Int"),
    }
}

impl KindOps for IntOps {
    fn kind(&self) -> ValueKind {
        ValueKind::Int
    }

    fn represent(&self, subject: &Value) -> String {
        int_of(subject).to_string()
    }

    fn is_true(&self, subject: &Value) -> bool {
        int_of(subject) != 0
    }

    fn is_equal(&self, subject: &Value, other: &Value) -> bool {
        match other {
            Value::Int(n) => int_of(subject) == *n,
            Value::Flt(f) => int_of(subject) as f64 == *f,
            _ => false,
        }
    }

    fn order(&self, subject: &Value, other: &Value) -> Option<Ordering> {
        match other {
            Value::Int(n) => Some(int_of(subject).cmp(n)),
            Value::Flt(f) => (int_of(subject) as f64).partial_cmp(f),
            _ => None,
        }
    }

    fn as_int(&self, subject: &Value) -> OpResult {
        Ok(subject.clone())
    }

    fn as_flt(&self, subject: &Value) -> OpResult {
        Ok(Value::Flt(int_of(subject) as f64))
    }

    fn as_str(&self, subject: &Value) -> OpResult {
        Ok(Value::str(int_of(subject).to_string()))
    }

    fn add(&self, subject: &Value, other: &Value) -> OpResult {
        let left = int_of(subject);
        match other {
            Value::Int(n) => Ok(Value::Int(left.wrapping_add(*n))),
            Value::Flt(f) => Ok(Value::Flt(left as f64 + f)),
            _ => Err(OpError::Unsupported),
        }
    }

    fn sub(&self, subject: &Value, other: &Value) -> OpResult {
        let left = int_of(subject);
        match other {
            Value::Int(n) => Ok(Value::Int(left.wrapping_sub(*n))),
            Value::Flt(f) => Ok(Value::Flt(left as f64 - f)),
            _ => Err(OpError::Unsupported),
        }
    }

    fn mul(&self, subject: &Value, other: &Value) -> OpResult {
        let left = int_of(subject);
        match other {
            Value::Int(n) => Ok(Value::Int(left.wrapping_mul(*n))),
            Value::Flt(f) => Ok(Value::Flt(left as f64 * f)),
            // Repetition is commutative: run it through the right kind.
            Value::Str(_) => ops_for(ValueKind::Str).mul(other, subject),
            Value::List(_) => ops_for(ValueKind::List).mul(other, subject),
            _ => Err(OpError::Unsupported),
        }
    }

    /// `/` keeps exact integer divisions as Int and widens otherwise.
    fn div(&self, subject: &Value, other: &Value) -> OpResult {
        let left = int_of(subject);
        match other {
            Value::Int(0) => Err(OpError::ZeroDivision),
            Value::Int(n) => {
                if left % n == 0 {
                    Ok(Value::Int(left / n))
                } else {
                    Ok(Value::Flt(left as f64 / *n as f64))
                }
            }
            Value::Flt(f) if *f == 0.0 => Err(OpError::ZeroDivision),
            Value::Flt(f) => Ok(Value::Flt(left as f64 / f)),
            _ => Err(OpError::Unsupported),
        }
    }

    fn fdiv(&self, subject: &Value, other: &Value) -> OpResult {
        let left = int_of(subject);
        match other {
            Value::Int(0) => Err(OpError::ZeroDivision),
            Value::Int(n) => Ok(Value::Int(left.div_euclid(*n))),
            Value::Flt(f) if *f == 0.0 => Err(OpError::ZeroDivision),
            Value::Flt(f) => Ok(Value::Flt((left as f64 / f).floor())),
            _ => Err(OpError::Unsupported),
        }
    }

    fn rem(&self, subject: &Value, other: &Value) -> OpResult {
        let left = int_of(subject);
        match other {
            Value::Int(0) => Err(OpError::ZeroDivision),
            Value::Int(n) => Ok(Value::Int(left % n)),
            Value::Flt(f) if *f == 0.0 => Err(OpError::ZeroDivision),
            Value::Flt(f) => Ok(Value::Flt(left as f64 % f)),
            _ => Err(OpError::Unsupported),
        }
    }

    /// Int ** non-negative Int stays Int; a negative exponent widens to Flt.
    fn pow(&self, subject: &Value, other: &Value) -> OpResult {
        let left = int_of(subject);
        match other {
            Value::Int(n) if *n >= 0 => {
                let result = (left as f64).powi(*n as i32);
                if result.is_nan() {
                    return Err(OpError::UnrealNumber);
                }
                Ok(Value::Int(result as i64))
            }
            Value::Int(n) => flt_pow(left as f64, *n as f64),
            Value::Flt(f) => flt_pow(left as f64, *f),
            _ => Err(OpError::Unsupported),
        }
    }

    fn negate(&self, subject: &Value) -> OpResult {
        Ok(Value::Int(-int_of(subject)))
    }
}

pub(super) fn flt_pow(base: f64, exponent: f64) -> OpResult {
    let result = base.powf(exponent);
    if result.is_nan() {
        return Err(OpError::UnrealNumber);
    }
    Ok(Value::Flt(result))
}
