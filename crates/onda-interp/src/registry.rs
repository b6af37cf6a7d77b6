// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Callable and module registries.
//!
//! Function values and traceback frames refer to callables and modules by
//! stable integer id. Both stores are append-only for the engine's lifetime:
//! ids are never reused and entries are never dropped, so a `Function` value
//! tucked away in a list stays callable after its defining scope is gone.

use std::rc::Rc;

use onda_ast::stmt::Stmt;
use onda_ast::{LineMap, Span};

/// Identifies a [`Callable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallableId(pub usize);

/// Identifies a [`Module`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleId(pub usize);

/// A registered user-defined function.
#[derive(Debug, Clone)]
pub struct Callable {
    pub id: CallableId,
    /// Module the body was parsed from.
    pub module: ModuleId,
    /// Definition site, for tracebacks.
    pub span: Span,
    /// Name the function was defined under, if any.
    pub name: Option<String>,
    pub params: Vec<String>,
    /// Body statements, shared so calls don't clone the AST.
    pub body: Rc<Vec<Stmt>>,
}

/// A loaded source module: the main script, or anything pulled in through
/// the `script`/`eval` natives.
#[derive(Debug)]
pub struct Module {
    pub id: ModuleId,
    /// Source path; `None` for strings (`-s`, `eval`, the REPL).
    pub path: Option<String>,
    pub source: String,
    pub line_map: LineMap,
}

#[derive(Debug, Default)]
pub struct Callables {
    entries: Vec<Callable>,
}

impl Callables {
    pub fn add(
        &mut self,
        module: ModuleId,
        span: Span,
        name: Option<String>,
        params: Vec<String>,
        body: Rc<Vec<Stmt>>,
    ) -> CallableId {
        let id = CallableId(self.entries.len());
        self.entries.push(Callable {
            id,
            module,
            span,
            name,
            params,
            body,
        });
        id
    }

    pub fn get(&self, id: CallableId) -> Option<&Callable> {
        self.entries.get(id.0)
    }
}

#[derive(Debug, Default)]
pub struct Modules {
    entries: Vec<Module>,
}

impl Modules {
    pub fn add(&mut self, path: Option<String>, source: String) -> ModuleId {
        let id = ModuleId(self.entries.len());
        let line_map = LineMap::new(&source);
        self.entries.push(Module {
            id,
            path,
            source,
            line_map,
        });
        id
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.entries.get(id.0)
    }
}
