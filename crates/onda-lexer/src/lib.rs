// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the Onda language.

mod lexer;

pub use lexer::{LexError, LexResult, Lexer};
