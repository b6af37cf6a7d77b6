// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement execution.

use std::rc::Rc;

use onda_ast::expr::Expr;
use onda_ast::stmt::{Stmt, StmtKind};

use crate::value::Value;

use super::{Interpreter, RuntimeDiagnostic, RuntimeError};

impl Interpreter {
    /// Execute a statement list. Each child's result is discarded; the
    /// first control signal or error stops the list via `?`.
    pub(crate) fn exec_block(&mut self, block: &[Stmt]) -> Result<Value, RuntimeDiagnostic> {
        for stmt in block {
            self.exec_stmt(stmt)?;
        }
        Ok(Value::Void)
    }

    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Value, RuntimeDiagnostic> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.eval_expr(expr),

            StmtKind::Def { name, params, body } => {
                let module = self.env.current_module();
                let id = self.callables.add(
                    module,
                    stmt.span,
                    Some(name.clone()),
                    params.clone(),
                    Rc::new(body.clone()),
                );
                self.env.set_local(name, Value::Function(id));
                Ok(Value::Void)
            }

            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                if self.eval_expr(cond)?.is_true() {
                    self.exec_block(then_body)
                } else if let Some(else_body) = else_body {
                    self.exec_block(else_body)
                } else {
                    Ok(Value::Void)
                }
            }

            StmtKind::While { cond, body } => {
                loop {
                    if !self.eval_expr(cond)?.is_true() {
                        break;
                    }
                    match self.exec_block(body) {
                        Ok(_) => {}
                        Err(diag) if matches!(diag.error, RuntimeError::Break) => break,
                        Err(diag) if matches!(diag.error, RuntimeError::Continue) => continue,
                        Err(e) => return Err(e),
                    }
                }
                Ok(Value::Void)
            }

            StmtKind::ForRange {
                name,
                from,
                till,
                body,
            } => {
                let from_val = self.eval_range_bound(from)?;
                let till_val = self.eval_range_bound(till)?;
                if from_val == till_val {
                    return Ok(Value::Void);
                }
                let step = if from_val < till_val { 1 } else { -1 };

                // The loop variable lives in the current scope and is
                // mutated each pass, not re-created.
                let mut i = from_val;
                while i != till_val {
                    self.env.set_local(name, Value::Int(i));
                    match self.exec_block(body) {
                        Ok(_) => {}
                        Err(diag) if matches!(diag.error, RuntimeError::Break) => break,
                        Err(diag) if matches!(diag.error, RuntimeError::Continue) => {
                            i += step;
                            continue;
                        }
                        Err(e) => return Err(e),
                    }
                    i += step;
                }
                Ok(Value::Void)
            }

            StmtKind::ForIn { name, iter, body } => {
                let subject = self.eval_expr(iter)?;
                let elements: Vec<Value> = match &subject {
                    Value::List(items) => items.borrow().iter().map(Value::deep_copy).collect(),
                    Value::Str(s) => s
                        .borrow()
                        .chars()
                        .map(|c| Value::str(c.to_string()))
                        .collect(),
                    other => {
                        return Err(self.fail(
                            RuntimeError::Type(format!("cannot iterate over {}", other.type_name())),
                            iter.span,
                        ))
                    }
                };
                for element in elements {
                    self.env.set_local(name, element);
                    match self.exec_block(body) {
                        Ok(_) => {}
                        Err(diag) if matches!(diag.error, RuntimeError::Break) => break,
                        Err(diag) if matches!(diag.error, RuntimeError::Continue) => continue,
                        Err(e) => return Err(e),
                    }
                }
                Ok(Value::Void)
            }

            StmtKind::Continue => Err(self.signal(RuntimeError::Continue, stmt.span)),

            StmtKind::Break => Err(self.signal(RuntimeError::Break, stmt.span)),

            StmtKind::Return(expr) => {
                let value = match expr {
                    Some(e) => self.eval_expr(e)?,
                    None => Value::Void,
                };
                Err(self.signal(RuntimeError::Return(value), stmt.span))
            }

            StmtKind::Exit(expr) => {
                let code = match expr {
                    Some(e) => {
                        let value = self.eval_expr(e)?;
                        match value {
                            Value::Int(n) => n,
                            other => {
                                return Err(self.fail(
                                    RuntimeError::Type(format!(
                                        "exit code must be Int, got {}",
                                        other.type_name()
                                    )),
                                    e.span,
                                ))
                            }
                        }
                    }
                    None => 0,
                };
                Err(self.signal(RuntimeError::Exit(code), stmt.span))
            }

            StmtKind::Assert(cond) => {
                if self.eval_expr(cond)?.is_true() {
                    Ok(Value::Void)
                } else {
                    Err(self.fail(RuntimeError::AssertionNotMet, cond.span))
                }
            }
        }
    }

    /// A `for` range bound must evaluate to an Int.
    fn eval_range_bound(&mut self, expr: &Expr) -> Result<i64, RuntimeDiagnostic> {
        match self.eval_expr(expr)? {
            Value::Int(n) => Ok(n),
            other => Err(self.fail(
                RuntimeError::Type(format!(
                    "loop range bound must be Int, got {}",
                    other.type_name()
                )),
                expr.span,
            )),
        }
    }
}
