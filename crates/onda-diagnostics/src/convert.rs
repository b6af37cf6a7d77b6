// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from phase error types to [`Diagnostic`].

use onda_interp::RuntimeDiagnostic;
use onda_lexer::LexError;
use onda_parser::{ParseError, ParseErrorKind};

use crate::codes::code_for;
use crate::{Diagnostic, ToDiagnostic};

impl ToDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.message.clone())
            .with_code(code_for("Syntax"))
            .with_span(self.span);
        if let Some(hint) = &self.hint {
            diag = diag.with_hint(hint.clone());
        }
        diag
    }
}

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let kind_name = match self.kind {
            ParseErrorKind::Syntax => "Syntax",
            ParseErrorKind::BreakOutsideLoop => "BreakOutsideLoop",
            ParseErrorKind::ContinueOutsideLoop => "ContinueOutsideLoop",
        };
        let mut diag = Diagnostic::error(self.message.clone())
            .with_code(code_for(kind_name))
            .with_span(self.span);
        if let Some(hint) = &self.hint {
            diag = diag.with_hint(hint.clone());
        }
        diag
    }
}

impl ToDiagnostic for RuntimeDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.error.to_string())
            .with_code(code_for(self.error.kind_name()))
            .with_span(self.span)
    }
}
