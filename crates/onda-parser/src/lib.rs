// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Onda language.
//!
//! Transforms a token stream into an abstract syntax tree. `break` and
//! `continue` outside a loop are rejected here, not at runtime.

mod parser;

pub use parser::{ParseError, ParseErrorKind, ParseResult, Parser};

/// Lex and parse a complete source text.
pub fn parse_source(source: &str) -> Result<Vec<onda_ast::stmt::Stmt>, ParseError> {
    let lex_result = onda_lexer::Lexer::new(source).tokenize();
    if let Some(e) = lex_result.errors.into_iter().next() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            span: e.span,
            message: e.message,
            hint: e.hint,
        });
    }
    let result = Parser::new(lex_result.tokens).parse();
    match result.errors.into_iter().next() {
        Some(e) => Err(e),
        None => Ok(result.block),
    }
}
