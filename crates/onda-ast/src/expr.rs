// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use crate::Span;

/// An expression in the AST.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// The kind of expression.
///
/// Which sub-expressions exist is fixed per kind; list-like kinds hold `Vec`s.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Integer literal (`true`/`false` lower to 1/0 during parsing)
    Int(i64),
    /// Float literal
    Flt(f64),
    /// String literal
    Str(String),
    /// The void literal
    Void,
    /// List literal ([1, 2, 3])
    List(Vec<Expr>),
    /// Object literal ({a: 1, b: 2})
    Object(Vec<(String, Expr)>),
    /// Variable read (global lookup)
    Ident(String),
    /// Binary operation; `And`/`Or` short-circuit in the evaluator
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Logical negation (`not x`), always yields Int 0/1
    Not(Box<Expr>),
    /// Arithmetic negation (`-x`)
    Neg(Box<Expr>),
    /// Conditional operator (`cond ? a : b`); exactly one branch evaluates
    Conditional {
        cond: Box<Expr>,
        then_val: Box<Expr>,
        else_val: Box<Expr>,
    },
    /// Index access (`x[i]`)
    Index {
        subject: Box<Expr>,
        index: Box<Expr>,
    },
    /// Slice access (`x[b:e]`); either bound may be omitted
    Slice {
        subject: Box<Expr>,
        begin: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },
    /// Member access (`obj.name`)
    Member {
        subject: Box<Expr>,
        name: String,
    },
    /// Call (`f(a, b)`); the callee is an arbitrary expression
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Assignment, value-returning and right-associative.
    ///
    /// `op` is the compound-assignment operator, if any. `global` routes
    /// bare-name targets through global lookup instead of the local scope.
    Assign {
        target: Box<Expr>,
        op: Option<BinOp>,
        value: Box<Expr>,
        global: bool,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}
