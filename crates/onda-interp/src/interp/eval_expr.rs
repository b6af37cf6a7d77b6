// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression evaluation.

use onda_ast::expr::{BinOp, Expr, ExprKind};
use onda_ast::Span;

use crate::kinds::{ops_for, OpError};
use crate::natives::Native;
use crate::value::Value;

use super::{Interpreter, RuntimeDiagnostic, RuntimeError};

impl Interpreter {
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Flt(f) => Ok(Value::Flt(*f)),
            ExprKind::Str(s) => Ok(Value::str(s.clone())),
            ExprKind::Void => Ok(Value::Void),

            ExprKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(item)?);
                }
                Ok(Value::list(values))
            }

            ExprKind::Object(members) => {
                let mut map = indexmap::IndexMap::with_capacity(members.len());
                for (name, value) in members {
                    let value = self.eval_expr(value)?;
                    map.insert(name.clone(), value);
                }
                Ok(Value::object(map))
            }

            ExprKind::Ident(name) => self.resolve_name(name, expr.span),

            ExprKind::Binary { op, left, right } => match op {
                // `and`/`or` short-circuit and return the deciding operand
                // unconverted.
                BinOp::And => {
                    let l = self.eval_expr(left)?;
                    if !l.is_true() {
                        return Ok(l);
                    }
                    self.eval_expr(right)
                }
                BinOp::Or => {
                    let l = self.eval_expr(left)?;
                    if l.is_true() {
                        return Ok(l);
                    }
                    self.eval_expr(right)
                }
                _ => {
                    let l = self.eval_expr(left)?;
                    let r = self.eval_expr(right)?;
                    self.eval_binop(*op, l, r, expr.span, right.span)
                }
            },

            ExprKind::Not(operand) => {
                let value = self.eval_expr(operand)?;
                Ok(Value::Int(!value.is_true() as i64))
            }

            ExprKind::Neg(operand) => {
                let value = self.eval_expr(operand)?;
                ops_for(value.kind())
                    .negate(&value)
                    .map_err(|e| self.op_diag(e, "-", &value, None, expr.span, expr.span))
            }

            ExprKind::Conditional {
                cond,
                then_val,
                else_val,
            } => {
                let chosen = if self.eval_expr(cond)?.is_true() {
                    then_val
                } else {
                    else_val
                };
                self.eval_expr(chosen)
            }

            ExprKind::Index { subject, index } => {
                let reference = self.index_reference(subject, index)?;
                Ok(reference.dereference())
            }

            ExprKind::Slice {
                subject,
                begin,
                end,
            } => {
                let reference = self.slice_reference(subject, begin.as_deref(), end.as_deref())?;
                Ok(reference.dereference())
            }

            ExprKind::Member { subject, name } => {
                let base = self.eval_expr(subject)?;
                let table = ops_for(base.kind());
                if !table.member_exists(&base, name) {
                    return Err(self.fail(
                        RuntimeError::Type(format!(
                            "no member `{}` on {}",
                            name,
                            base.type_name()
                        )),
                        expr.span,
                    ));
                }
                match table.refer_to_member(&base, name) {
                    Some(reference) => Ok(reference.dereference()),
                    None => Err(self.fail(
                        RuntimeError::Type(format!(
                            "no member `{}` on {}",
                            name,
                            base.type_name()
                        )),
                        expr.span,
                    )),
                }
            }

            ExprKind::Call { callee, args } => {
                let callee_val = self.eval_expr(callee)?;
                match callee_val {
                    Value::Function(id) => self.call_function(id, args, expr.span),
                    Value::Native(native) => self.call_native(native, args, expr.span),
                    other => Err(self.fail(
                        RuntimeError::Type(format!("{} is not callable", other.type_name())),
                        callee.span,
                    )),
                }
            }

            ExprKind::Assign {
                target,
                op,
                value,
                global,
            } => self.eval_assign(target, *op, value, *global, expr.span),
        }
    }

    /// Name resolution: natives are reserved and win; variables resolve
    /// through global lookup and are read out as deep copies.
    fn resolve_name(&mut self, name: &str, span: Span) -> Result<Value, RuntimeDiagnostic> {
        if let Some(native) = Native::from_name(name) {
            return Ok(Value::Native(native));
        }
        match self.env.get_global(name) {
            Some(value) => Ok(value.deep_copy()),
            None => Err(self.fail(RuntimeError::SymbolNotDefined(name.to_string()), span)),
        }
    }

    /// Binary operator dispatch through the left operand's kind table.
    pub(super) fn eval_binop(
        &mut self,
        op: BinOp,
        l: Value,
        r: Value,
        span: Span,
        right_span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let table = ops_for(l.kind());
        let result = match op {
            BinOp::Add => table.add(&l, &r),
            BinOp::Sub => table.sub(&l, &r),
            BinOp::Mul => table.mul(&l, &r),
            BinOp::Div => table.div(&l, &r),
            BinOp::FloorDiv => table.fdiv(&l, &r),
            BinOp::Mod => table.rem(&l, &r),
            BinOp::Pow => table.pow(&l, &r),
            BinOp::Eq => return Ok(Value::Int(l.is_equal(&r) as i64)),
            BinOp::Ne => return Ok(Value::Int(!l.is_equal(&r) as i64)),
            BinOp::Gt | BinOp::Ge | BinOp::Lt | BinOp::Le => {
                return match table.order(&l, &r) {
                    Some(ordering) => {
                        let truth = match op {
                            BinOp::Gt => ordering.is_gt(),
                            BinOp::Ge => ordering.is_ge(),
                            BinOp::Lt => ordering.is_lt(),
                            _ => ordering.is_le(),
                        };
                        Ok(Value::Int(truth as i64))
                    }
                    None => Err(self.fail(
                        RuntimeError::Type(format!(
                            "cannot compare {} with {}",
                            l.type_name(),
                            r.type_name()
                        )),
                        span,
                    )),
                };
            }
            BinOp::And | BinOp::Or => unreachable!("short-circuit operators handled above"),
        };
        result.map_err(|e| self.op_diag(e, op.symbol(), &l, Some(&r), span, right_span))
    }

    /// Map an [`OpError`] onto a positioned runtime error.
    pub(super) fn op_diag(
        &self,
        e: OpError,
        op: &str,
        l: &Value,
        r: Option<&Value>,
        span: Span,
        right_span: Span,
    ) -> RuntimeDiagnostic {
        match e {
            OpError::Unsupported => {
                let message = match r {
                    Some(r) => format!(
                        "`{}` is not supported between {} and {}",
                        op,
                        l.type_name(),
                        r.type_name()
                    ),
                    None => format!("`{}` is not supported on {}", op, l.type_name()),
                };
                self.fail(RuntimeError::Type(message), span)
            }
            OpError::ZeroDivision => self.fail(RuntimeError::ZeroDivision, right_span),
            OpError::UnrealNumber => self.fail(RuntimeError::UnrealNumber, span),
            OpError::OutOfRange => self.fail(RuntimeError::Index, span),
        }
    }
}
