//! The lexer implementation using logos.

use logos::Logos;
use onda_ast::token::{Token, TokenKind};
use onda_ast::Span;

/// Raw token type for logos - literal values are parsed in a second pass.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Horizontal whitespace never separates statements
#[logos(skip r"#[^\n]*")] // Line comments
enum RawToken {
    // === Keywords ===
    #[token("void")]
    Void,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("global")]
    Global,
    #[token("def")]
    Def,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("from")]
    From,
    #[token("till")]
    Till,
    #[token("in")]
    In,
    #[token("while")]
    While,
    #[token("continue")]
    Continue,
    #[token("break")]
    Break,
    #[token("return")]
    Return,
    #[token("exit")]
    Exit,
    #[token("assert")]
    Assert,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,

    // === Operators (order matters - longer first) ===
    #[token("//=")]
    SlashSlashEq,
    #[token("**=")]
    StarStarEq,

    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("//")]
    SlashSlash,
    #[token("**")]
    StarStar,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    // === Statement separators (newline or `;`) ===
    #[token("\n")]
    #[token(";")]
    Sep,

    // === Literals ===
    // Float must come before int so `1.5` doesn't lex as `1` `.` `5`
    #[regex(r"[0-9]+\.[0-9]+")]
    Flt,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""([^"\\]|\\.)*""#, priority = 3)]
    Str,

    // Unterminated string: opening quote with no closing quote on the line
    #[regex(r#""([^"\\\n]|\\.)*"#, priority = 2)]
    UnterminatedStr,

    // === Identifier (must come after keywords) ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The lexer for Onda source code.
pub struct Lexer<'a> {
    source: &'a str,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, collecting multiple errors.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            if self.errors.len() >= MAX_ERRORS {
                break;
            }

            let span = logos_lexer.span();
            let slice = logos_lexer.slice();

            let kind = match result {
                Ok(raw) => match convert_token(raw, slice, span.start, span.end) {
                    Ok(kind) => kind,
                    Err(e) => {
                        self.errors.push(e);
                        continue;
                    }
                },
                Err(()) => {
                    let ch = self.source[span.start..].chars().next().unwrap_or('?');
                    self.errors.push(LexError::unexpected_char(ch, span.start));
                    continue;
                }
            };

            tokens.push(Token {
                kind,
                span: Span::new(span.start, span.end),
            });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(self.source.len(), self.source.len()),
        });

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }
}

/// Convert a raw logos token to a TokenKind, parsing literal values.
fn convert_token(raw: RawToken, slice: &str, start: usize, end: usize) -> Result<TokenKind, LexError> {
    Ok(match raw {
        RawToken::Void => TokenKind::Void,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Global => TokenKind::Global,
        RawToken::Def => TokenKind::Def,
        RawToken::If => TokenKind::If,
        RawToken::Elif => TokenKind::Elif,
        RawToken::Else => TokenKind::Else,
        RawToken::For => TokenKind::For,
        RawToken::From => TokenKind::From,
        RawToken::Till => TokenKind::Till,
        RawToken::In => TokenKind::In,
        RawToken::While => TokenKind::While,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Break => TokenKind::Break,
        RawToken::Return => TokenKind::Return,
        RawToken::Exit => TokenKind::Exit,
        RawToken::Assert => TokenKind::Assert,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,

        RawToken::EqEq => TokenKind::EqEq,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::SlashSlash => TokenKind::SlashSlash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::SlashSlashEq => TokenKind::SlashSlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::StarStarEq => TokenKind::StarStarEq,
        RawToken::Question => TokenKind::Question,
        RawToken::Dot => TokenKind::Dot,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Comma => TokenKind::Comma,

        RawToken::Sep => TokenKind::Sep,

        RawToken::Int => {
            let value = slice
                .parse::<i64>()
                .map_err(|_| LexError::invalid_number(start, end))?;
            TokenKind::Int(value)
        }
        RawToken::Flt => {
            let value = slice
                .parse::<f64>()
                .map_err(|_| LexError::invalid_number(start, end))?;
            TokenKind::Flt(value)
        }
        RawToken::Str => {
            let inner = &slice[1..slice.len() - 1];
            TokenKind::Str(parse_string(inner, start)?)
        }
        RawToken::UnterminatedStr => {
            return Err(LexError::unterminated_string(start, end));
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
    })
}

/// Parse a string literal body, decoding escape sequences.
fn parse_string(s: &str, pos: usize) -> Result<String, LexError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            _ => return Err(LexError::invalid_escape(pos)),
        }
    }

    Ok(result)
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    fn unexpected_char(ch: char, pos: usize) -> Self {
        Self {
            span: Span::new(pos, pos + ch.len_utf8()),
            message: format!("unexpected character '{}'", ch),
            hint: None,
        }
    }

    fn unterminated_string(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            message: "unterminated string".to_string(),
            hint: Some("add a closing '\"'".to_string()),
        }
    }

    fn invalid_escape(pos: usize) -> Self {
        Self {
            span: Span::new(pos, pos + 1),
            message: "invalid escape sequence".to_string(),
            hint: Some("valid escapes: \\n \\r \\t \\\\ \\\"".to_string()),
        }
    }

    fn invalid_number(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            message: "invalid number".to_string(),
            hint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let result = Lexer::new(source).tokenize();
        assert!(result.is_ok(), "lex errors: {:?}", result.errors);
        result.tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn numbers_and_operators() {
        assert_eq!(
            kinds("1 + 2.5 ** 3"),
            vec![
                TokenKind::Int(1),
                TokenKind::Plus,
                TokenKind::Flt(2.5),
                TokenKind::StarStar,
                TokenKind::Int(3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn floor_division_is_not_a_comment() {
        assert_eq!(
            kinds("7 // 2"),
            vec![
                TokenKind::Int(7),
                TokenKind::SlashSlash,
                TokenKind::Int(2),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_versus_identifiers() {
        assert_eq!(
            kinds("form from tiller till"),
            vec![
                TokenKind::Ident("form".into()),
                TokenKind::From,
                TokenKind::Ident("tiller".into()),
                TokenKind::Till,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_escapes_decode() {
        assert_eq!(
            kinds(r#""a\n\"b\\""#),
            vec![TokenKind::Str("a\n\"b\\".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let result = Lexer::new("x = \"abc").tokenize();
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("unterminated"));
    }

    #[test]
    fn comments_and_separators() {
        assert_eq!(
            kinds("a = 1 # trailing note\nb = 2; c = 3"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Eq,
                TokenKind::Int(1),
                TokenKind::Sep,
                TokenKind::Ident("b".into()),
                TokenKind::Eq,
                TokenKind::Int(2),
                TokenKind::Sep,
                TokenKind::Ident("c".into()),
                TokenKind::Eq,
                TokenKind::Int(3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spans_cover_the_lexeme() {
        let result = Lexer::new("abc = 12").tokenize();
        assert_eq!(result.tokens[0].span, Span::new(0, 3));
        assert_eq!(result.tokens[2].span, Span::new(6, 8));
    }

    #[test]
    fn unexpected_character_is_reported_and_skipped() {
        let result = Lexer::new("a $ b").tokenize();
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains('$'));
        assert_eq!(result.tokens.len(), 3); // a, b, eof
    }
}
