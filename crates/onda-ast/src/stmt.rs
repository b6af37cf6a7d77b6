// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use crate::expr::Expr;
use crate::Span;

/// A statement in the AST.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// The kind of statement.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Expression statement (includes assignments)
    Expr(Expr),
    /// Function definition; binds a function value to `name`
    Def {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// If/elif/else chain (elif nests as the else branch)
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    /// While loop
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// Range loop: `for name from a till b { .. }`, till exclusive
    ForRange {
        name: String,
        from: Expr,
        till: Expr,
        body: Vec<Stmt>,
    },
    /// Element loop: `for name in iterable { .. }`
    ForIn {
        name: String,
        iter: Expr,
        body: Vec<Stmt>,
    },
    Continue,
    Break,
    Return(Option<Expr>),
    /// Terminate the process with an optional integer code
    Exit(Option<Expr>),
    /// Fail with AssertionNotMet when the condition is falsy
    Assert(Expr),
}
