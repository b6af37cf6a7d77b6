// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Assignment targets and reference resolution.
//!
//! An assignment target resolves to a [`Reference`] before the right-hand
//! side is evaluated. Bare names are handled against the scope chain
//! directly (create-or-update local, or through global lookup with the
//! `global` qualifier); indexed, sliced, and member targets resolve into
//! the container they alias.

use onda_ast::expr::{BinOp, Expr, ExprKind};
use onda_ast::Span;

use crate::kinds::{ops_for, OpError};
use crate::natives::Native;
use crate::reference::Reference;
use crate::value::Value;

use super::{Interpreter, RuntimeDiagnostic, RuntimeError};

impl Interpreter {
    pub(super) fn eval_assign(
        &mut self,
        target: &Expr,
        op: Option<BinOp>,
        value: &Expr,
        global: bool,
        span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        if let ExprKind::Ident(name) = &target.kind {
            let result = match op {
                Some(op) => {
                    let current = match self.env.get_global(name) {
                        Some(v) => v.clone(),
                        None => {
                            return Err(self.fail(
                                RuntimeError::SymbolNotDefined(name.clone()),
                                target.span,
                            ))
                        }
                    };
                    let rhs = self.eval_expr(value)?;
                    self.eval_binop(op, current, rhs, span, value.span)?
                }
                None => self.eval_expr(value)?,
            };
            // The variable owns an independent copy; the returned value
            // feeds chained assignment without aliasing it.
            if global {
                self.env.set_global(name, result.deep_copy());
            } else {
                self.env.set_local(name, result.deep_copy());
            }
            return Ok(result);
        }

        let reference = self.resolve_target(target)?;
        let result = match op {
            Some(op) => {
                let current = reference.dereference();
                let rhs = self.eval_expr(value)?;
                self.eval_binop(op, current, rhs, span, value.span)?
            }
            None => self.eval_expr(value)?,
        };

        if !reference.can_assign(&result) {
            return Err(self.fail(
                RuntimeError::Type(view_mismatch_message(&reference, &result)),
                value.span,
            ));
        }
        reference.assign(&result);
        Ok(result)
    }

    /// Resolve an indexed, sliced, or member target into a reference.
    fn resolve_target(&mut self, target: &Expr) -> Result<Reference, RuntimeDiagnostic> {
        match &target.kind {
            ExprKind::Index { subject, index } => self.index_reference(subject, index),
            ExprKind::Slice {
                subject,
                begin,
                end,
            } => self.slice_reference(subject, begin.as_deref(), end.as_deref()),
            ExprKind::Member { subject, name } => {
                let base = self.eval_place(subject)?;
                match &base {
                    // Assignment creates a missing member.
                    Value::Object(members) => {
                        if !members.borrow().contains_key(name) {
                            members.borrow_mut().insert(name.clone(), Value::Void);
                        }
                        Ok(Reference::Member {
                            object: members.clone(),
                            name: name.clone(),
                        })
                    }
                    other => Err(self.fail(
                        RuntimeError::Type(format!(
                            "{} has no assignable members",
                            other.type_name()
                        )),
                        subject.span,
                    )),
                }
            }
            _ => Err(self.fail(
                RuntimeError::Type("invalid assignment target".to_string()),
                target.span,
            )),
        }
    }

    /// Resolve `subject[index]` into a reference; shared by reads and
    /// assignment targets.
    pub(super) fn index_reference(
        &mut self,
        subject: &Expr,
        index: &Expr,
    ) -> Result<Reference, RuntimeDiagnostic> {
        let base = self.eval_place(subject)?;
        let idx = self.expect_index(index)?;
        ops_for(base.kind())
            .refer_to_index(&base, idx)
            .map_err(|e| match e {
                OpError::OutOfRange => self.fail(RuntimeError::Index, index.span),
                _ => self.fail(
                    RuntimeError::Type(format!("{} is not indexable", base.type_name())),
                    subject.span,
                ),
            })
    }

    /// Resolve `subject[begin:end]` into a view reference.
    pub(super) fn slice_reference(
        &mut self,
        subject: &Expr,
        begin: Option<&Expr>,
        end: Option<&Expr>,
    ) -> Result<Reference, RuntimeDiagnostic> {
        let base = self.eval_place(subject)?;
        let begin_val = match begin {
            Some(e) => Some(self.expect_index(e)?),
            None => None,
        };
        let end_val = match end {
            Some(e) => Some(self.expect_index(e)?),
            None => None,
        };
        let error_span = begin.or(end).map(|e| e.span).unwrap_or(subject.span);
        ops_for(base.kind())
            .refer_to_range(&base, begin_val, end_val)
            .map_err(|e| match e {
                OpError::OutOfRange => self.fail(RuntimeError::Index, error_span),
                _ => self.fail(
                    RuntimeError::Type(format!("{} is not sliceable", base.type_name())),
                    subject.span,
                ),
            })
    }

    fn expect_index(&mut self, expr: &Expr) -> Result<i64, RuntimeDiagnostic> {
        match self.eval_expr(expr)? {
            Value::Int(n) => Ok(n),
            other => Err(self.fail(
                RuntimeError::Type(format!("index must be Int, got {}", other.type_name())),
                expr.span,
            )),
        }
    }

    /// Evaluate an expression as a *place*: variables and container slots
    /// are read without deep-copying, so a reference built on the result
    /// aliases the stored container. Anything else falls back to ordinary
    /// evaluation (a temporary).
    fn eval_place(&mut self, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        match &expr.kind {
            ExprKind::Ident(name) => {
                if let Some(native) = Native::from_name(name) {
                    return Ok(Value::Native(native));
                }
                match self.env.get_global(name) {
                    Some(value) => Ok(value.clone()),
                    None => {
                        Err(self.fail(RuntimeError::SymbolNotDefined(name.clone()), expr.span))
                    }
                }
            }
            ExprKind::Index { subject, index } => {
                let reference = self.index_reference(subject, index)?;
                Ok(reference.peek())
            }
            ExprKind::Member { subject, name } => {
                let base = self.eval_place(subject)?;
                match ops_for(base.kind()).refer_to_member(&base, name) {
                    Some(reference) => Ok(reference.peek()),
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
            _ => self.eval_expr(expr),
        }
    }
}

fn view_mismatch_message(reference: &Reference, value: &Value) -> String {
    match reference {
        Reference::ListView { width, .. } => format!(
            "a list view of width {} takes a List of the same length, got {}",
            width,
            value.type_name()
        ),
        Reference::StrView { width, .. } => format!(
            "a string view of width {} takes a Str of the same length, got {}",
            width,
            value.type_name()
        ),
        _ => "cannot assign through this reference".to_string(),
    }
}
