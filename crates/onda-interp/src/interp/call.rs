// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Function and native calling.

use onda_ast::expr::Expr;
use onda_ast::Span;

use crate::natives::Native;
use crate::registry::CallableId;
use crate::value::Value;

use super::{Interpreter, RuntimeDiagnostic, RuntimeError};

impl Interpreter {
    /// Call a user function with unevaluated argument expressions. Arity is
    /// checked before any argument runs, so a mismatch has no side effects.
    pub(crate) fn call_function(
        &mut self,
        id: CallableId,
        args: &[Expr],
        call_span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let expected = match self.callables.get(id) {
            Some(callable) => callable.params.len(),
            None => {
                return Err(self.fail(
                    RuntimeError::System("call target no longer exists".to_string()),
                    call_span,
                ))
            }
        };
        if args.len() != expected {
            return Err(self.fail(
                RuntimeError::CallableArgCount {
                    expected,
                    got: args.len(),
                },
                call_span,
            ));
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }
        self.call_function_with_values(id, values, call_span)
    }

    /// Call a user function with already-evaluated arguments (also the
    /// entry point for natives that invoke callbacks, like `sort`).
    pub(crate) fn call_function_with_values(
        &mut self,
        id: CallableId,
        args: Vec<Value>,
        call_span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let callable = match self.callables.get(id) {
            Some(callable) => callable.clone(),
            None => {
                return Err(self.fail(
                    RuntimeError::System("call target no longer exists".to_string()),
                    call_span,
                ))
            }
        };
        if args.len() != callable.params.len() {
            return Err(self.fail(
                RuntimeError::CallableArgCount {
                    expected: callable.params.len(),
                    got: args.len(),
                },
                call_span,
            ));
        }

        self.env.push_frame(
            callable.module,
            Some(id),
            call_span,
            callable.name.clone(),
            false,
        );
        // Parameters bind to deep copies: the callee can never alias its
        // caller's containers.
        for (param, arg) in callable.params.iter().zip(args.iter()) {
            self.env.set_local(param, arg.deep_copy());
        }

        let result = self.exec_block(&callable.body);
        self.env.pop_frame();

        // The call boundary absorbs `Return`; it must not leak into the
        // caller's own statement loop.
        match result {
            Ok(_) => Ok(Value::Void),
            Err(RuntimeDiagnostic {
                error: RuntimeError::Return(value),
                ..
            }) => Ok(value),
            Err(diag) => Err(diag),
        }
    }

    /// Call a native function; same arity-before-arguments discipline.
    pub(crate) fn call_native(
        &mut self,
        native: Native,
        args: &[Expr],
        call_span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let expected = native.param_count();
        if args.len() != expected {
            return Err(self.fail(
                RuntimeError::CallableArgCount {
                    expected,
                    got: args.len(),
                },
                call_span,
            ));
        }

        let mut values = Vec::with_capacity(args.len());
        let mut spans = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
            spans.push(arg.span);
        }
        self.dispatch_native(native, values, &spans, call_span)
    }
}
