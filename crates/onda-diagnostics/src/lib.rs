// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Onda diagnostics.
//!
//! Provides a unified diagnostic type that the CLI consumes. Each pipeline
//! phase's error type is converted to [`Diagnostic`] via the
//! [`ToDiagnostic`] trait; runtime errors additionally carry a traceback
//! rendered by [`formatter::render_traceback`].

pub mod codes;
pub mod convert;
pub mod formatter;
pub mod json;

use onda_ast::Span;
use serde::Serialize;

/// A diagnostic with enough context for display.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<ErrorCode>,
    pub message: String,
    /// Primary source location, when one exists.
    pub span: Option<Span>,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// An error code like E007, derived from the error taxonomy.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub String);

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            span: None,
            hint: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(ErrorCode(code.into()));
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Convert a phase error into a diagnostic.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}
