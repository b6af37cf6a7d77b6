// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! AST definitions for the Onda language.
//!
//! Shared by the lexer (tokens, spans), the parser (expression and statement
//! nodes), and the interpreter. Nodes carry byte spans; line numbers are
//! derived on demand through [`LineMap`].

pub mod expr;
pub mod span;
pub mod stmt;
pub mod token;

pub use span::{LineMap, Span};
