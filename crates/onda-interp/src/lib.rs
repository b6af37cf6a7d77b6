// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Onda execution engine.
//!
//! This is a tree-walk interpreter that directly evaluates the AST. The
//! pieces: a tagged [`Value`] over the eight data kinds, a per-kind
//! operation table ([`kinds`]), non-owning [`Reference`] views for indexing
//! and slice assignment, a scope chain ([`env`]), append-only callable and
//! module registries, and an evaluator whose control flow (return, break,
//! continue, exit) travels through the error channel so that every recursion
//! site propagates it with `?`.

pub mod env;
pub mod kinds;
pub mod natives;
pub mod reference;
pub mod registry;
pub mod value;

mod interp;

pub use interp::{Interpreter, RuntimeDiagnostic, RuntimeError, TraceFrame};
pub use natives::Native;
pub use registry::{Callable, CallableId, Module, ModuleId};
pub use value::{Value, ValueKind};
