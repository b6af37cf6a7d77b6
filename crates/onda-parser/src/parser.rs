// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The recursive-descent parser implementation.

use onda_ast::expr::{BinOp, Expr, ExprKind};
use onda_ast::stmt::{Stmt, StmtKind};
use onda_ast::token::{Token, TokenKind};
use onda_ast::Span;

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The parser for Onda source code.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Loop nesting depth; zero outside any loop. Reset inside def bodies.
    loop_depth: usize,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            loop_depth: 0,
            errors: Vec::new(),
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream ends with Eof"))
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        if !self.at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(
                kind.display_name(),
                self.current_kind(),
                self.current().span,
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(ParseError::expected("a name", other, self.current().span)),
        }
    }

    fn skip_seps(&mut self) {
        while self.check(&TokenKind::Sep) {
            self.advance();
        }
    }

    /// A statement must end at a separator, a closing brace, or end of file.
    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        if self.check(&TokenKind::Sep) {
            self.skip_seps();
            Ok(())
        } else if self.check(&TokenKind::Eof) || self.check(&TokenKind::RBrace) {
            Ok(())
        } else {
            Err(ParseError::expected(
                "end of statement",
                self.current_kind(),
                self.current().span,
            ))
        }
    }

    /// Skip to the next statement boundary after an error.
    fn synchronize(&mut self) {
        let mut brace_depth = 0usize;
        while !self.at_end() {
            match self.current_kind() {
                TokenKind::LBrace => {
                    brace_depth += 1;
                    self.advance();
                }
                TokenKind::RBrace => {
                    if brace_depth == 0 {
                        return;
                    }
                    brace_depth -= 1;
                    self.advance();
                }
                TokenKind::Sep if brace_depth == 0 => {
                    self.skip_seps();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // =========================================================================
    // Entry
    // =========================================================================

    /// Parse a whole program: a statement list terminated by Eof.
    pub fn parse(&mut self) -> ParseResult {
        let mut block = Vec::new();
        self.skip_seps();
        while !self.at_end() {
            match self.parse_stmt() {
                Ok(stmt) => {
                    block.push(stmt);
                    if let Err(e) = self.expect_terminator() {
                        self.errors.push(e);
                        self.synchronize();
                    }
                }
                Err(e) => {
                    self.errors.push(e);
                    if self.errors.len() >= MAX_ERRORS {
                        break;
                    }
                    self.synchronize();
                }
            }
            self.skip_seps();
        }
        ParseResult {
            block,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Parse a brace-delimited statement block.
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut block = Vec::new();
        self.skip_seps();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let stmt = self.parse_stmt()?;
            block.push(stmt);
            if !self.check(&TokenKind::RBrace) {
                self.expect_terminator()?;
            }
            self.skip_seps();
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(block)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        match self.current_kind() {
            TokenKind::Def => self.parse_def(start),
            TokenKind::If => self.parse_if(start),
            TokenKind::While => self.parse_while(start),
            TokenKind::For => self.parse_for(start),
            TokenKind::Continue => {
                self.advance();
                if self.loop_depth == 0 {
                    return Err(ParseError::outside_loop(
                        ParseErrorKind::ContinueOutsideLoop,
                        "continue",
                        start,
                    ));
                }
                Ok(Stmt {
                    kind: StmtKind::Continue,
                    span: start,
                })
            }
            TokenKind::Break => {
                self.advance();
                if self.loop_depth == 0 {
                    return Err(ParseError::outside_loop(
                        ParseErrorKind::BreakOutsideLoop,
                        "break",
                        start,
                    ));
                }
                Ok(Stmt {
                    kind: StmtKind::Break,
                    span: start,
                })
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.stmt_is_done() {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                let span = value.as_ref().map(|e| start.to(e.span)).unwrap_or(start);
                Ok(Stmt {
                    kind: StmtKind::Return(value),
                    span,
                })
            }
            TokenKind::Exit => {
                self.advance();
                let code = if self.stmt_is_done() {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                let span = code.as_ref().map(|e| start.to(e.span)).unwrap_or(start);
                Ok(Stmt {
                    kind: StmtKind::Exit(code),
                    span,
                })
            }
            TokenKind::Assert => {
                self.advance();
                let cond = self.parse_expr()?;
                let span = start.to(cond.span);
                Ok(Stmt {
                    kind: StmtKind::Assert(cond),
                    span,
                })
            }
            _ => {
                let expr = self.parse_expr()?;
                let span = expr.span;
                Ok(Stmt {
                    kind: StmtKind::Expr(expr),
                    span,
                })
            }
        }
    }

    fn stmt_is_done(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Sep | TokenKind::RBrace | TokenKind::Eof
        )
    }

    fn parse_def(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.advance(); // def
        let name = self.expect_ident()?;
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        self.skip_seps();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.expect_ident()?);
                self.skip_seps();
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
                self.skip_seps();
            }
        }
        let end = self.expect(&TokenKind::RParen)?.span;
        self.skip_seps();

        // A def body is not "inside" any enclosing loop.
        let saved_depth = std::mem::replace(&mut self.loop_depth, 0);
        let body = self.parse_block();
        self.loop_depth = saved_depth;

        Ok(Stmt {
            kind: StmtKind::Def {
                name,
                params,
                body: body?,
            },
            span: start.to(end),
        })
    }

    fn parse_if(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.advance(); // if / elif
        let cond = self.parse_expr()?;
        self.skip_seps();
        let then_body = self.parse_block()?;

        let else_body = if self.check(&TokenKind::Elif) {
            let elif_span = self.current_span();
            let nested = self.parse_if(elif_span)?;
            Some(vec![nested])
        } else if self.match_token(&TokenKind::Else) {
            self.skip_seps();
            Some(self.parse_block()?)
        } else {
            None
        };

        let span = start.to(cond.span);
        Ok(Stmt {
            kind: StmtKind::If {
                cond,
                then_body,
                else_body,
            },
            span,
        })
    }

    fn parse_while(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.advance(); // while
        let cond = self.parse_expr()?;
        self.skip_seps();
        self.loop_depth += 1;
        let body = self.parse_block();
        self.loop_depth -= 1;
        let span = start.to(cond.span);
        Ok(Stmt {
            kind: StmtKind::While { cond, body: body? },
            span,
        })
    }

    fn parse_for(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.advance(); // for
        let name = self.expect_ident()?;

        let kind = if self.match_token(&TokenKind::From) {
            let from = self.parse_expr()?;
            self.expect(&TokenKind::Till)?;
            let till = self.parse_expr()?;
            self.skip_seps();
            self.loop_depth += 1;
            let body = self.parse_block();
            self.loop_depth -= 1;
            StmtKind::ForRange {
                name,
                from,
                till,
                body: body?,
            }
        } else if self.match_token(&TokenKind::In) {
            let iter = self.parse_expr()?;
            self.skip_seps();
            self.loop_depth += 1;
            let body = self.parse_block();
            self.loop_depth -= 1;
            StmtKind::ForIn {
                name,
                iter,
                body: body?,
            }
        } else {
            return Err(ParseError::expected(
                "'from' or 'in'",
                self.current_kind(),
                self.current_span(),
            ));
        };

        Ok(Stmt { kind, span: start })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Assignment is right-associative and value-returning; `global` routes
    /// the target through global lookup.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        let global = self.match_token(&TokenKind::Global);

        let target = self.parse_conditional()?;

        let op = match self.current_kind() {
            TokenKind::Eq => None,
            TokenKind::PlusEq => Some(BinOp::Add),
            TokenKind::MinusEq => Some(BinOp::Sub),
            TokenKind::StarEq => Some(BinOp::Mul),
            TokenKind::SlashEq => Some(BinOp::Div),
            TokenKind::SlashSlashEq => Some(BinOp::FloorDiv),
            TokenKind::PercentEq => Some(BinOp::Mod),
            TokenKind::StarStarEq => Some(BinOp::Pow),
            _ => {
                if global {
                    return Err(ParseError::new(
                        "'global' must introduce an assignment",
                        start,
                    ));
                }
                return Ok(target);
            }
        };
        self.advance();

        if !is_assignable(&target) {
            return Err(ParseError::new(
                "invalid assignment target; assign to a name, index, slice, or member",
                target.span,
            ));
        }

        let value = self.parse_assignment()?;
        let span = target.span.to(value.span);
        Ok(Expr {
            kind: ExprKind::Assign {
                target: Box::new(target),
                op,
                value: Box::new(value),
                global,
            },
            span,
        })
    }

    /// Conditional operator: `cond ? a : b`.
    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_or()?;
        if !self.match_token(&TokenKind::Question) {
            return Ok(cond);
        }
        self.skip_seps();
        let then_val = self.parse_conditional()?;
        self.skip_seps();
        self.expect(&TokenKind::Colon)?;
        self.skip_seps();
        let else_val = self.parse_conditional()?;
        let span = cond.span.to(else_val.span);
        Ok(Expr {
            kind: ExprKind::Conditional {
                cond: Box::new(cond),
                then_val: Box::new(then_val),
                else_val: Box::new(else_val),
            },
            span,
        })
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.match_token(&TokenKind::Or) {
            self.skip_seps();
            let right = self.parse_and()?;
            left = binary(BinOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;
        while self.match_token(&TokenKind::And) {
            self.skip_seps();
            let right = self.parse_not()?;
            left = binary(BinOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Not) {
            let start = self.current_span();
            self.advance();
            let operand = self.parse_not()?;
            let span = start.to(operand.span);
            return Ok(Expr {
                kind: ExprKind::Not(Box::new(operand)),
                span,
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_arith()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::BangEq => BinOp::Ne,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::GtEq => BinOp::Ge,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::LtEq => BinOp::Le,
                _ => break,
            };
            self.advance();
            self.skip_seps();
            let right = self.parse_arith()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_arith(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            self.skip_seps();
            let right = self.parse_term()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::SlashSlash => BinOp::FloorDiv,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            self.skip_seps();
            let right = self.parse_power()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `**` is right-associative and binds tighter than unary minus on its
    /// left, looser on its right: `-2 ** 2` is `-(2 ** 2)`.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_unary()?;
        if self.match_token(&TokenKind::StarStar) {
            self.skip_seps();
            let exponent = self.parse_power()?;
            return Ok(binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Minus) {
            let start = self.current_span();
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.to(operand.span);
            return Ok(Expr {
                kind: ExprKind::Neg(Box::new(operand)),
                span,
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.current_kind() {
                TokenKind::LParen => {
                    self.advance();
                    let mut args = Vec::new();
                    self.skip_seps();
                    if !self.check(&TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            self.skip_seps();
                            if !self.match_token(&TokenKind::Comma) {
                                break;
                            }
                            self.skip_seps();
                        }
                    }
                    let end = self.expect(&TokenKind::RParen)?.span;
                    let span = expr.span.to(end);
                    expr = Expr {
                        kind: ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    };
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.skip_seps();
                    expr = self.parse_index_or_slice(expr)?;
                }
                TokenKind::Dot => {
                    self.advance();
                    let name_span = self.current_span();
                    let name = self.expect_ident()?;
                    let span = expr.span.to(name_span);
                    expr = Expr {
                        kind: ExprKind::Member {
                            subject: Box::new(expr),
                            name,
                        },
                        span,
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// After the opening `[`: index `x[i]`, or slice `x[b:e]` with either
    /// bound omissible.
    fn parse_index_or_slice(&mut self, subject: Expr) -> Result<Expr, ParseError> {
        let begin = if self.check(&TokenKind::Colon) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        if self.match_token(&TokenKind::Colon) {
            self.skip_seps();
            let end = if self.check(&TokenKind::RBracket) {
                None
            } else {
                Some(Box::new(self.parse_expr()?))
            };
            let close = self.expect(&TokenKind::RBracket)?.span;
            let span = subject.span.to(close);
            return Ok(Expr {
                kind: ExprKind::Slice {
                    subject: Box::new(subject),
                    begin,
                    end,
                },
                span,
            });
        }
        let index = begin.ok_or_else(|| {
            ParseError::expected("an index expression", self.current_kind(), self.current_span())
        })?;
        let close = self.expect(&TokenKind::RBracket)?.span;
        let span = subject.span.to(close);
        Ok(Expr {
            kind: ExprKind::Index {
                subject: Box::new(subject),
                index,
            },
            span,
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        let kind = match self.current_kind().clone() {
            TokenKind::Int(n) => {
                self.advance();
                ExprKind::Int(n)
            }
            TokenKind::Flt(f) => {
                self.advance();
                ExprKind::Flt(f)
            }
            TokenKind::Str(s) => {
                self.advance();
                ExprKind::Str(s)
            }
            TokenKind::True => {
                self.advance();
                ExprKind::Int(1)
            }
            TokenKind::False => {
                self.advance();
                ExprKind::Int(0)
            }
            TokenKind::Void => {
                self.advance();
                ExprKind::Void
            }
            TokenKind::Ident(name) => {
                self.advance();
                ExprKind::Ident(name)
            }
            TokenKind::LParen => {
                self.advance();
                self.skip_seps();
                let inner = self.parse_expr()?;
                self.skip_seps();
                self.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => return self.parse_list_literal(),
            TokenKind::LBrace => return self.parse_object_literal(),
            other => {
                return Err(ParseError::expected("an expression", &other, span));
            }
        };
        Ok(Expr { kind, span })
    }

    fn parse_list_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LBracket)?.span;
        let mut items = Vec::new();
        self.skip_seps();
        if !self.check(&TokenKind::RBracket) {
            loop {
                items.push(self.parse_expr()?);
                self.skip_seps();
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
                self.skip_seps();
            }
        }
        let end = self.expect(&TokenKind::RBracket)?.span;
        Ok(Expr {
            kind: ExprKind::List(items),
            span: start.to(end),
        })
    }

    fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?.span;
        let mut members = Vec::new();
        self.skip_seps();
        if !self.check(&TokenKind::RBrace) {
            loop {
                let name = self.expect_ident()?;
                self.expect(&TokenKind::Colon)?;
                self.skip_seps();
                let value = self.parse_expr()?;
                members.push((name, value));
                self.skip_seps();
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
                self.skip_seps();
            }
        }
        let end = self.expect(&TokenKind::RBrace)?.span;
        Ok(Expr {
            kind: ExprKind::Object(members),
            span: start.to(end),
        })
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.to(right.span);
    Expr {
        kind: ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    }
}

fn is_assignable(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Ident(_) | ExprKind::Index { .. } | ExprKind::Slice { .. } | ExprKind::Member { .. }
    )
}

/// Result of parsing: the program block plus any errors found.
#[derive(Debug)]
pub struct ParseResult {
    pub block: Vec<Stmt>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Which class of parse-time failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Syntax,
    BreakOutsideLoop,
    ContinueOutsideLoop,
}

/// A parser error with location and friendly message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Syntax,
            span,
            message: message.into(),
            hint: None,
        }
    }

    fn expected(expected: &str, found: &TokenKind, span: Span) -> Self {
        Self::new(
            format!("expected {}, found {}", expected, found.display_name()),
            span,
        )
    }

    fn outside_loop(kind: ParseErrorKind, keyword: &str, span: Span) -> Self {
        Self {
            kind,
            span,
            message: format!("'{}' outside of a loop", keyword),
            hint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onda_ast::expr::ExprKind;
    use onda_ast::stmt::StmtKind;

    fn parse(src: &str) -> ParseResult {
        let lex_result = onda_lexer::Lexer::new(src).tokenize();
        assert!(lex_result.is_ok(), "lex errors: {:?}", lex_result.errors);
        Parser::new(lex_result.tokens).parse()
    }

    fn parse_ok(src: &str) -> Vec<Stmt> {
        let result = parse(src);
        assert!(result.is_ok(), "parse errors: {:?}", result.errors);
        result.block
    }

    #[test]
    fn statements_split_on_newlines_and_semicolons() {
        let block = parse_ok("a = 1\nb = 2; c = 3");
        assert_eq!(block.len(), 3);
    }

    #[test]
    fn def_with_params_and_return() {
        let block = parse_ok("def add(a, b) {\n    return a + b\n}");
        match &block[0].kind {
            StmtKind::Def { name, params, body } => {
                assert_eq!(name, "add");
                assert_eq!(params, &["a".to_string(), "b".to_string()]);
                assert!(matches!(body[0].kind, StmtKind::Return(Some(_))));
            }
            other => panic!("expected def, got {:?}", other),
        }
    }

    #[test]
    fn elif_chain_nests_into_else() {
        let block = parse_ok("if a { put(1) } elif b { put(2) } else { put(3) }");
        match &block[0].kind {
            StmtKind::If { else_body, .. } => {
                let nested = else_body.as_ref().expect("elif branch");
                assert!(matches!(nested[0].kind, StmtKind::If { .. }));
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn for_range_and_for_in() {
        let block = parse_ok("for i from 0 till 3 { put(i) }\nfor x in [1, 2] { put(x) }");
        assert!(matches!(block[0].kind, StmtKind::ForRange { .. }));
        assert!(matches!(block[1].kind, StmtKind::ForIn { .. }));
    }

    #[test]
    fn break_outside_loop_is_rejected() {
        let result = parse("break");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::BreakOutsideLoop);
    }

    #[test]
    fn continue_in_def_inside_loop_is_rejected() {
        let result = parse("while 1 { def f() { continue } }");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::ContinueOutsideLoop);
    }

    #[test]
    fn precedence_mul_before_add() {
        let block = parse_ok("x = 1 + 2 * 3");
        match &block[0].kind {
            StmtKind::Expr(Expr {
                kind: ExprKind::Assign { value, .. },
                ..
            }) => match &value.kind {
                ExprKind::Binary { op: BinOp::Add, right, .. } => {
                    assert!(matches!(
                        right.kind,
                        ExprKind::Binary { op: BinOp::Mul, .. }
                    ));
                }
                other => panic!("expected add at the top, got {:?}", other),
            },
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn power_is_right_associative() {
        let block = parse_ok("x = 2 ** 3 ** 2");
        match &block[0].kind {
            StmtKind::Expr(Expr {
                kind: ExprKind::Assign { value, .. },
                ..
            }) => match &value.kind {
                ExprKind::Binary { op: BinOp::Pow, right, .. } => {
                    assert!(matches!(
                        right.kind,
                        ExprKind::Binary { op: BinOp::Pow, .. }
                    ));
                }
                other => panic!("expected pow, got {:?}", other),
            },
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn chained_assignment_is_right_associative() {
        let block = parse_ok("a = b = 1");
        match &block[0].kind {
            StmtKind::Expr(Expr {
                kind: ExprKind::Assign { value, .. },
                ..
            }) => {
                assert!(matches!(value.kind, ExprKind::Assign { .. }));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn slices_allow_omitted_bounds() {
        let block = parse_ok("a[1:3]\na[:2]\na[1:]\na[:]");
        for stmt in &block {
            match &stmt.kind {
                StmtKind::Expr(e) => assert!(matches!(e.kind, ExprKind::Slice { .. })),
                other => panic!("expected expression, got {:?}", other),
            }
        }
    }

    #[test]
    fn object_literal_and_member_access() {
        let block = parse_ok("o = {a: 1, b: 2}\no.a = o.b");
        match &block[0].kind {
            StmtKind::Expr(Expr {
                kind: ExprKind::Assign { value, .. },
                ..
            }) => match &value.kind {
                ExprKind::Object(members) => assert_eq!(members.len(), 2),
                other => panic!("expected object literal, got {:?}", other),
            },
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn global_requires_assignment() {
        let result = parse("global x");
        assert!(!result.is_ok());
    }

    #[test]
    fn invalid_assignment_target_is_rejected() {
        let result = parse("1 + 2 = 3");
        assert!(!result.is_ok());
    }

    #[test]
    fn ternary_parses_both_branches() {
        let block = parse_ok("x = a > 0 ? \"pos\" : \"neg\"");
        match &block[0].kind {
            StmtKind::Expr(Expr {
                kind: ExprKind::Assign { value, .. },
                ..
            }) => {
                assert!(matches!(value.kind, ExprKind::Conditional { .. }));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }
}
