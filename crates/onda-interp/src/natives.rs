// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The native function library.
//!
//! Natives are values (`Value::Native`) resolved by name before variables,
//! called with the same arity discipline as user functions. They fail by
//! returning the same positioned diagnostics as interpreter-internal
//! operations.

use std::io::Write as _;

use onda_ast::Span;

use crate::interp::{Interpreter, RuntimeDiagnostic, RuntimeError};
use crate::kinds::ops_for;
use crate::value::{Value, ValueKind};

/// Every native function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Native {
    Put,
    Print,
    Int,
    Flt,
    Str,
    Len,
    Sleep,
    Chr,
    Ord,
    Read,
    Write,
    Append,
    Input,
    Script,
    Exist,
    Split,
    Eval,
    Replace,
    Join,
    Sort,
    Getwd,
    Setwd,
}

impl Native {
    pub fn from_name(name: &str) -> Option<Native> {
        Some(match name {
            "put" => Native::Put,
            "print" => Native::Print,
            "int" => Native::Int,
            "flt" => Native::Flt,
            "str" => Native::Str,
            "len" => Native::Len,
            "sleep" => Native::Sleep,
            "chr" => Native::Chr,
            "ord" => Native::Ord,
            "read" => Native::Read,
            "write" => Native::Write,
            "append" => Native::Append,
            "input" => Native::Input,
            "script" => Native::Script,
            "exist" => Native::Exist,
            "split" => Native::Split,
            "eval" => Native::Eval,
            "replace" => Native::Replace,
            "join" => Native::Join,
            "sort" => Native::Sort,
            "getwd" => Native::Getwd,
            "setwd" => Native::Setwd,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Native::Put => "put",
            Native::Print => "print",
            Native::Int => "int",
            Native::Flt => "flt",
            Native::Str => "str",
            Native::Len => "len",
            Native::Sleep => "sleep",
            Native::Chr => "chr",
            Native::Ord => "ord",
            Native::Read => "read",
            Native::Write => "write",
            Native::Append => "append",
            Native::Input => "input",
            Native::Script => "script",
            Native::Exist => "exist",
            Native::Split => "split",
            Native::Eval => "eval",
            Native::Replace => "replace",
            Native::Join => "join",
            Native::Sort => "sort",
            Native::Getwd => "getwd",
            Native::Setwd => "setwd",
        }
    }

    /// Declared parameter count, enforced before arguments are evaluated.
    pub fn param_count(self) -> usize {
        match self {
            Native::Getwd => 0,
            Native::Write | Native::Append | Native::Split | Native::Join | Native::Sort => 2,
            Native::Replace => 3,
            _ => 1,
        }
    }
}

impl Interpreter {
    /// Dispatch a native call. `args` holds the evaluated arguments,
    /// `arg_spans` their source positions for precise error locations.
    pub(crate) fn dispatch_native(
        &mut self,
        native: Native,
        args: Vec<Value>,
        arg_spans: &[Span],
        call_span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        match native {
            Native::Put => {
                self.write_output(&args[0].represent());
                Ok(Value::Void)
            }
            Native::Print => {
                self.write_output(&args[0].represent());
                self.write_output("\n");
                Ok(Value::Void)
            }
            Native::Int => self.convert(&args[0], ValueKind::Int, arg_spans[0]),
            Native::Flt => self.convert(&args[0], ValueKind::Flt, arg_spans[0]),
            Native::Str => self.convert(&args[0], ValueKind::Str, arg_spans[0]),
            Native::Len => match ops_for(args[0].kind()).length(&args[0]) {
                Some(len) => Ok(Value::Int(len as i64)),
                None => Err(self.fail(
                    RuntimeError::Type(format!("{} has no length", args[0].type_name())),
                    arg_spans[0],
                )),
            },
            Native::Sleep => {
                let ms = self.expect_int(&args[0], arg_spans[0])?;
                if ms > 0 {
                    std::thread::sleep(std::time::Duration::from_millis(ms as u64));
                }
                Ok(Value::Void)
            }
            Native::Chr => {
                let code = self.expect_int(&args[0], arg_spans[0])?;
                let c = u32::try_from(code)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        self.fail(
                            RuntimeError::Encoding(format!("{} is not a valid code point", code)),
                            arg_spans[0],
                        )
                    })?;
                Ok(Value::str(c.to_string()))
            }
            Native::Ord => {
                let s = self.expect_str(&args[0], arg_spans[0])?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Int(c as i64)),
                    _ => Err(self.fail(
                        RuntimeError::Type("ord expects a single-character string".to_string()),
                        arg_spans[0],
                    )),
                }
            }
            Native::Read => {
                let path = self.expect_str(&args[0], arg_spans[0])?;
                match std::fs::read_to_string(&path) {
                    Ok(text) => Ok(Value::str(text)),
                    Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Err(self.fail(
                        RuntimeError::Encoding(format!("{} is not valid UTF-8", path)),
                        arg_spans[0],
                    )),
                    Err(e) => Err(self.fail(
                        RuntimeError::File(format!("cannot read {}: {}", path, e)),
                        arg_spans[0],
                    )),
                }
            }
            Native::Write => self.write_file(&args, arg_spans, false),
            Native::Append => self.write_file(&args, arg_spans, true),
            Native::Input => {
                self.write_output(&args[0].represent());
                let mut line = String::new();
                std::io::stdout().flush().ok();
                match std::io::stdin().read_line(&mut line) {
                    Ok(_) => {
                        while line.ends_with('\n') || line.ends_with('\r') {
                            line.pop();
                        }
                        Ok(Value::str(line))
                    }
                    Err(e) => Err(self.fail(
                        RuntimeError::System(format!("cannot read input: {}", e)),
                        call_span,
                    )),
                }
            }
            Native::Script => {
                let path = self.expect_str(&args[0], arg_spans[0])?;
                let source = std::fs::read_to_string(&path).map_err(|e| {
                    self.fail(
                        RuntimeError::File(format!("cannot read {}: {}", path, e)),
                        arg_spans[0],
                    )
                })?;
                self.run_submodule(source, Some(path), call_span)
            }
            Native::Eval => {
                let code = self.expect_str(&args[0], arg_spans[0])?;
                self.run_submodule(code, None, call_span)
            }
            Native::Exist => {
                let path = self.expect_str(&args[0], arg_spans[0])?;
                Ok(Value::Int(std::path::Path::new(&path).exists() as i64))
            }
            Native::Split => self.split(&args, arg_spans),
            Native::Replace => {
                let search = self.expect_str(&args[0], arg_spans[0])?;
                let replace = self.expect_str(&args[1], arg_spans[1])?;
                let subject = self.expect_str(&args[2], arg_spans[2])?;
                if search.is_empty() {
                    return Err(self.fail(
                        RuntimeError::Type("replace search string is empty".to_string()),
                        arg_spans[0],
                    ));
                }
                Ok(Value::str(subject.replace(&search, &replace)))
            }
            Native::Join => self.join(&args, arg_spans),
            Native::Sort => self.sort(&args, arg_spans, call_span),
            Native::Getwd => match std::env::current_dir() {
                Ok(dir) => Ok(Value::str(dir.to_string_lossy().into_owned())),
                Err(e) => Err(self.fail(
                    RuntimeError::System(format!("cannot get working directory: {}", e)),
                    call_span,
                )),
            },
            Native::Setwd => {
                let path = self.expect_str(&args[0], arg_spans[0])?;
                std::env::set_current_dir(&path).map_err(|e| {
                    self.fail(
                        RuntimeError::File(format!("cannot enter {}: {}", path, e)),
                        arg_spans[0],
                    )
                })?;
                Ok(Value::Void)
            }
        }
    }

    /// `int`/`flt`/`str` conversion through the kind table.
    fn convert(
        &self,
        value: &Value,
        to: ValueKind,
        span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let table = ops_for(value.kind());
        let converted = match to {
            ValueKind::Int => table.as_int(value),
            ValueKind::Flt => table.as_flt(value),
            _ => table.as_str(value),
        };
        converted.map_err(|_| {
            self.fail(
                RuntimeError::Type(format!(
                    "cannot convert {} to {}",
                    value.type_name(),
                    to.name()
                )),
                span,
            )
        })
    }

    fn expect_int(&self, value: &Value, span: Span) -> Result<i64, RuntimeDiagnostic> {
        match value {
            Value::Int(n) => Ok(*n),
            other => Err(self.fail(
                RuntimeError::Type(format!("expected Int, got {}", other.type_name())),
                span,
            )),
        }
    }

    fn expect_str(&self, value: &Value, span: Span) -> Result<String, RuntimeDiagnostic> {
        match value {
            Value::Str(s) => Ok(s.borrow().clone()),
            other => Err(self.fail(
                RuntimeError::Type(format!("expected Str, got {}", other.type_name())),
                span,
            )),
        }
    }

    fn write_file(
        &mut self,
        args: &[Value],
        arg_spans: &[Span],
        append: bool,
    ) -> Result<Value, RuntimeDiagnostic> {
        let path = self.expect_str(&args[0], arg_spans[0])?;
        let text = self.expect_str(&args[1], arg_spans[1])?;
        let result = if append {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .and_then(|mut file| file.write_all(text.as_bytes()))
        } else {
            std::fs::write(&path, text.as_bytes())
        };
        result.map_err(|e| {
            self.fail(
                RuntimeError::File(format!("cannot write {}: {}", path, e)),
                arg_spans[0],
            )
        })?;
        Ok(Value::Void)
    }

    /// Split a string on any of a list of delimiters; empty tokens are
    /// dropped.
    fn split(&self, args: &[Value], arg_spans: &[Span]) -> Result<Value, RuntimeDiagnostic> {
        let subject = self.expect_str(&args[0], arg_spans[0])?;
        let delims = match &args[1] {
            Value::List(items) => items.borrow().clone(),
            other => {
                return Err(self.fail(
                    RuntimeError::Type(format!("expected List, got {}", other.type_name())),
                    arg_spans[1],
                ))
            }
        };
        let mut delim_strs = Vec::with_capacity(delims.len());
        for delim in &delims {
            match delim {
                Value::Str(s) if !s.borrow().is_empty() => delim_strs.push(s.borrow().clone()),
                _ => {
                    return Err(self.fail(
                        RuntimeError::Type(
                            "split delimiters must be non-empty strings".to_string(),
                        ),
                        arg_spans[1],
                    ))
                }
            }
        }

        let mut tokens = Vec::new();
        let mut rest = subject.as_str();
        let mut current = String::new();
        'outer: while !rest.is_empty() {
            for delim in &delim_strs {
                if let Some(after) = rest.strip_prefix(delim.as_str()) {
                    if !current.is_empty() {
                        tokens.push(Value::str(std::mem::take(&mut current)));
                    }
                    rest = after;
                    continue 'outer;
                }
            }
            let c = rest.chars().next().expect("rest is non-empty");
            current.push(c);
            rest = &rest[c.len_utf8()..];
        }
        if !current.is_empty() {
            tokens.push(Value::str(current));
        }
        Ok(Value::list(tokens))
    }

    fn join(&self, args: &[Value], arg_spans: &[Span]) -> Result<Value, RuntimeDiagnostic> {
        let items = match &args[0] {
            Value::List(items) => items.borrow().clone(),
            other => {
                return Err(self.fail(
                    RuntimeError::Type(format!("expected List, got {}", other.type_name())),
                    arg_spans[0],
                ))
            }
        };
        let separator = self.expect_str(&args[1], arg_spans[1])?;
        let mut parts = Vec::with_capacity(items.len());
        for item in &items {
            match item {
                Value::Str(s) => parts.push(s.borrow().clone()),
                other => {
                    return Err(self.fail(
                        RuntimeError::Type(format!(
                            "join expects a list of strings, found {}",
                            other.type_name()
                        )),
                        arg_spans[0],
                    ))
                }
            }
        }
        Ok(Value::str(parts.join(&separator)))
    }

    /// Sort a copy of the list with a user-supplied comparator returning a
    /// negative/zero/positive Int. Insertion sort, so a comparator error can
    /// propagate out mid-way.
    fn sort(
        &mut self,
        args: &[Value],
        arg_spans: &[Span],
        call_span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let items = match &args[0] {
            Value::List(items) => items.borrow().iter().map(Value::deep_copy).collect::<Vec<_>>(),
            other => {
                return Err(self.fail(
                    RuntimeError::Type(format!("expected List, got {}", other.type_name())),
                    arg_spans[0],
                ))
            }
        };
        let comparator = match &args[1] {
            Value::Function(id) => *id,
            other => {
                return Err(self.fail(
                    RuntimeError::Type(format!(
                        "sort expects a comparator function, got {}",
                        other.type_name()
                    )),
                    arg_spans[1],
                ))
            }
        };

        let mut items = items;
        for i in 1..items.len() {
            let mut j = i;
            while j > 0 {
                let rating = self.call_function_with_values(
                    comparator,
                    vec![items[j - 1].clone(), items[j].clone()],
                    call_span,
                )?;
                let rating = match rating {
                    Value::Int(n) => n,
                    other => {
                        return Err(self.fail(
                            RuntimeError::Type(format!(
                                "comparator must return Int, got {}",
                                other.type_name()
                            )),
                            call_span,
                        ))
                    }
                };
                if rating > 0 {
                    items.swap(j - 1, j);
                    j -= 1;
                } else {
                    break;
                }
            }
        }
        Ok(Value::list(items))
    }
}
