// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The interpreter implementation.
//!
//! `eval_expr`/`exec_stmt` return `Result<Value, RuntimeDiagnostic>`; the
//! control signals `Return`, `Break`, `Continue`, and `Exit` travel through
//! the error channel, so every recursion site propagates them with `?` and
//! the loops and call boundaries that consume them match on the diagnostic.

use std::cell::RefCell;
use std::rc::Rc;

use onda_ast::Span;
use onda_parser::{ParseError, ParseErrorKind};

mod assign;
mod call;
mod eval_expr;
mod exec_stmt;

use crate::env::Environment;
use crate::registry::{Callables, ModuleId, Modules};
use crate::value::Value;

/// The tree-walk interpreter: scope chain, registries, and output sink.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) callables: Callables,
    pub(crate) modules: Modules,
    /// Optional output buffer for capturing stdout (used in tests).
    output_buffer: Option<Rc<RefCell<String>>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            env: Environment::new(ModuleId(0)),
            callables: Callables::default(),
            modules: Modules::default(),
            output_buffer: None,
        }
    }

    /// Returns interpreter and output buffer reference.
    pub fn with_captured_output() -> (Self, Rc<RefCell<String>>) {
        let buffer = Rc::new(RefCell::new(String::new()));
        let mut interp = Self::new();
        interp.output_buffer = Some(buffer.clone());
        (interp, buffer)
    }

    /// Registered modules, for diagnostics rendering.
    pub fn modules(&self) -> &Modules {
        &self.modules
    }

    /// Run a whole program given as a string.
    pub fn run_source(&mut self, source: &str) -> Result<Value, RuntimeDiagnostic> {
        self.run_root(source.to_string(), None)
    }

    /// Run a script file.
    pub fn run_file(&mut self, path: &str) -> Result<Value, RuntimeDiagnostic> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            self.fail(
                RuntimeError::File(format!("cannot read {}: {}", path, e)),
                Span::new(0, 0),
            )
        })?;
        self.run_root(source, Some(path.to_string()))
    }

    /// Run one interactive line in the root scope; returns the value of a
    /// trailing expression statement so the REPL can echo it.
    pub fn run_line(&mut self, source: &str) -> Result<Option<Value>, RuntimeDiagnostic> {
        let module = self.modules.add(None, source.to_string());
        self.env.set_root_module(module);
        let block = match onda_parser::parse_source(source) {
            Ok(block) => block,
            Err(e) => return Err(self.parse_diag(e)),
        };

        let mut last = None;
        for stmt in &block {
            match &stmt.kind {
                onda_ast::stmt::StmtKind::Expr(expr) => {
                    let value = match self.eval_expr(expr) {
                        Ok(value) => value,
                        Err(d) => return self.absorb_return(Err(d)).map(Some),
                    };
                    last = match value {
                        Value::Void => None,
                        value => Some(value),
                    };
                }
                _ => {
                    if let Err(d) = self.exec_stmt(stmt) {
                        return self.absorb_return(Err(d)).map(Some);
                    }
                    last = None;
                }
            }
        }
        Ok(last)
    }

    /// Run a module's source in the root scope. The result is Void unless
    /// the script returned a value.
    fn run_root(
        &mut self,
        source: String,
        path: Option<String>,
    ) -> Result<Value, RuntimeDiagnostic> {
        let module = self.modules.add(path, source);
        self.env.set_root_module(module);
        let source = self
            .modules
            .get(module)
            .map(|m| m.source.clone())
            .unwrap_or_default();
        let block = match onda_parser::parse_source(&source) {
            Ok(block) => block,
            Err(e) => return Err(self.parse_diag(e)),
        };
        let result = self.exec_block(&block);
        self.absorb_return(result)
    }

    /// Evaluate a sub-module (the `eval`/`script` natives) in a fresh
    /// transparent frame, so the module sees its caller's scope. Errors
    /// inside re-surface to the caller with the evaluation boundary as a
    /// trace frame.
    pub(crate) fn run_submodule(
        &mut self,
        source: String,
        path: Option<String>,
        call_site: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let label = path.clone();
        let module = self.modules.add(path, source.clone());
        self.env.push_frame(module, None, call_site, label, true);
        let result = match onda_parser::parse_source(&source) {
            Ok(block) => self.exec_block(&block),
            Err(e) => Err(self.parse_diag(e)),
        };
        self.env.pop_frame();
        self.absorb_return(result)
    }

    /// A call or module boundary absorbs `Return` into a plain value.
    fn absorb_return(
        &self,
        result: Result<Value, RuntimeDiagnostic>,
    ) -> Result<Value, RuntimeDiagnostic> {
        match result {
            Ok(_) => Ok(Value::Void),
            Err(RuntimeDiagnostic {
                error: RuntimeError::Return(value),
                ..
            }) => Ok(value),
            Err(diag) => Err(diag),
        }
    }

    pub(crate) fn write_output(&mut self, s: &str) {
        use std::io::Write as _;
        if let Some(buffer) = &self.output_buffer {
            buffer.borrow_mut().push_str(s);
        } else {
            print!("{}", s);
            std::io::stdout().flush().ok();
        }
    }

    /// Build a positioned error, capturing a traceback from the live scope
    /// chain at this moment.
    pub(crate) fn fail(&self, error: RuntimeError, span: Span) -> RuntimeDiagnostic {
        let frames = self.env.frames();
        let trace = frames
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, frame)| TraceFrame {
                module: frames[i - 1].module,
                span: frame.call_site,
                label: frame.label.clone(),
            })
            .collect();
        RuntimeDiagnostic {
            error,
            span,
            module: self.env.current_module(),
            trace,
        }
    }

    /// Build a control-flow signal; no traceback is captured because these
    /// never surface to the user.
    pub(crate) fn signal(&self, error: RuntimeError, span: Span) -> RuntimeDiagnostic {
        RuntimeDiagnostic {
            error,
            span,
            module: self.env.current_module(),
            trace: Vec::new(),
        }
    }

    fn parse_diag(&self, e: ParseError) -> RuntimeDiagnostic {
        let error = match e.kind {
            ParseErrorKind::Syntax => RuntimeError::Syntax(e.message),
            ParseErrorKind::BreakOutsideLoop => RuntimeError::BreakOutsideLoop,
            ParseErrorKind::ContinueOutsideLoop => RuntimeError::ContinueOutsideLoop,
        };
        self.fail(error, e.span)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// A runtime error. The last four variants are control flow, not failures;
/// they never escape the loop or call boundary that consumes them.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("{0}")]
    Syntax(String),

    #[error("'break' outside of a loop")]
    BreakOutsideLoop,

    #[error("'continue' outside of a loop")]
    ContinueOutsideLoop,

    #[error("symbol `{0}` is not defined")]
    SymbolNotDefined(String),

    #[error("expected {expected} argument{}, got {got}", if *.expected == 1 { "" } else { "s" })]
    CallableArgCount { expected: usize, got: usize },

    #[error("index out of range")]
    Index,

    #[error("division by zero")]
    ZeroDivision,

    #[error("operation produces an unreal number")]
    UnrealNumber,

    #[error("{0}")]
    Type(String),

    #[error("{0}")]
    Encoding(String),

    #[error("{0}")]
    File(String),

    #[error("{0}")]
    System(String),

    #[error("assertion not met")]
    AssertionNotMet,

    // Control flow (not actual errors)
    #[error("return")]
    Return(Value),

    #[error("break")]
    Break,

    #[error("continue")]
    Continue,

    #[error("exit with code {0}")]
    Exit(i64),
}

impl RuntimeError {
    /// The taxonomy name, used for error codes and the one-line summary.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuntimeError::Syntax(_) => "Syntax",
            RuntimeError::BreakOutsideLoop => "BreakOutsideLoop",
            RuntimeError::ContinueOutsideLoop => "ContinueOutsideLoop",
            RuntimeError::SymbolNotDefined(_) => "SymbolNotDefined",
            RuntimeError::CallableArgCount { .. } => "CallableArgCount",
            RuntimeError::Index => "Index",
            RuntimeError::ZeroDivision => "ZeroDivision",
            RuntimeError::UnrealNumber => "UnrealNumber",
            RuntimeError::Type(_) => "Type",
            RuntimeError::Encoding(_) => "Encoding",
            RuntimeError::File(_) => "File",
            RuntimeError::System(_) => "System",
            RuntimeError::AssertionNotMet => "AssertionNotMet",
            RuntimeError::Return(_) => "Return",
            RuntimeError::Break => "Break",
            RuntimeError::Continue => "Continue",
            RuntimeError::Exit(_) => "Exit",
        }
    }

    /// True for the control variants.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            RuntimeError::Return(_)
                | RuntimeError::Break
                | RuntimeError::Continue
                | RuntimeError::Exit(_)
        )
    }
}

/// One entry of a runtime traceback: where a call (or module evaluation)
/// was made from.
#[derive(Debug, Clone)]
pub struct TraceFrame {
    /// Module containing the call site.
    pub module: ModuleId,
    /// The call site itself.
    pub span: Span,
    /// Callee name, when known.
    pub label: Option<String>,
}

/// A runtime error with its position, module, and the call chain that led
/// to it, captured from the live scope chain at failure time.
#[derive(Debug)]
pub struct RuntimeDiagnostic {
    pub error: RuntimeError,
    pub span: Span,
    pub module: ModuleId,
    /// Outermost call first; the error's own position is the innermost entry.
    pub trace: Vec<TraceFrame>,
}

impl std::fmt::Display for RuntimeDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for RuntimeDiagnostic {}
