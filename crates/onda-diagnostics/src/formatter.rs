// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal rendering for diagnostics and runtime tracebacks.
//!
//! Static diagnostics render with a source excerpt and caret:
//!
//! ```text
//! error[E001]: expected an expression, found ')'
//!   --> demo.onda:2:9
//!    |
//!  2 | put(1 + )
//!    |         ^
//! ```
//!
//! Runtime failures render as a multi-frame traceback, outermost call
//! first, each frame showing the module, line, optional callee label, and
//! an underlined excerpt, followed by the one-line error summary.

use colored::Colorize;

use onda_ast::{LineMap, Span};
use onda_interp::{Interpreter, ModuleId, RuntimeDiagnostic};

use crate::codes::code_for;
use crate::Diagnostic;

/// Formats diagnostics against a single source text.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        let severity = "error".red().bold();
        match &diagnostic.code {
            Some(code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                code.0.clone().red().bold(),
                diagnostic.message.bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity, diagnostic.message.bold())),
        }

        if let Some(span) = diagnostic.span {
            let (line, col) = self.line_map.locate(span.start);
            let file = self.file_name.unwrap_or("<string>");
            out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, line, col));

            if let Some(text) = self.line_map.line_text(self.source, line) {
                let gutter_width = line.to_string().len().max(2);
                out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
                out.push_str(&format!(
                    "{:>width$} {} {}\n",
                    line.to_string().blue().bold(),
                    "|".blue(),
                    text,
                    width = gutter_width + 1,
                ));
                let caret_len = span.end.saturating_sub(span.start).max(1).min(
                    text.len().saturating_sub(col - 1).max(1),
                );
                out.push_str(&format!(
                    "{} {} {}{}\n",
                    " ".repeat(gutter_width + 1),
                    "|".blue(),
                    " ".repeat(col - 1),
                    "^".repeat(caret_len).red().bold(),
                ));
            }
        }

        if let Some(hint) = &diagnostic.hint {
            out.push_str(&format!("   {} {}: {}\n", "=".cyan(), "hint".cyan().bold(), hint));
        }

        out
    }
}

/// Render a runtime failure as a traceback against the interpreter's
/// module store.
pub fn render_traceback(diag: &RuntimeDiagnostic, interp: &Interpreter) -> String {
    let mut out = String::new();

    for frame in &diag.trace {
        render_frame(
            &mut out,
            interp,
            frame.module,
            frame.span,
            frame.label.as_deref(),
        );
    }
    // The innermost entry is the error's own position.
    render_frame(&mut out, interp, diag.module, diag.span, None);

    let code = code_for(diag.error.kind_name());
    out.push_str(&format!(
        "{}[{}]: {}\n",
        "Error".red().bold(),
        code.red().bold(),
        diag.error
    ));
    out
}

fn render_frame(
    out: &mut String,
    interp: &Interpreter,
    module_id: ModuleId,
    span: Span,
    label: Option<&str>,
) {
    let module = match interp.modules().get(module_id) {
        Some(module) => module,
        None => return,
    };
    let name = module.path.as_deref().unwrap_or("<string>");
    let (line, col) = module.line_map.locate(span.start);

    out.push_str(&format!("File \"{}\", line {}", name, line).bold().to_string());
    if let Some(label) = label {
        out.push_str(&format!(", in {}", label).bold().to_string());
    }
    out.push_str(":\n");

    if let Some(text) = module.line_map.line_text(&module.source, line) {
        let trimmed = text.trim_start();
        let leading = text.len() - trimmed.len();
        out.push_str(&format!("    {}\n", trimmed));

        let offset = (col - 1).saturating_sub(leading);
        let width = span
            .end
            .saturating_sub(span.start)
            .min(trimmed.len().saturating_sub(offset))
            .max(1);
        out.push_str(&format!(
            "    {}{}\n",
            " ".repeat(offset),
            "~".repeat(width).red().to_string(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traceback_shows_frames_and_summary() {
        colored::control::set_override(false);
        let mut interp = Interpreter::new();
        let diag = interp
            .run_source("def inner() { return 1 / 0 }\ndef outer() { return inner() }\nouter()")
            .expect_err("expected zero division");
        let rendered = render_traceback(&diag, &interp);
        assert!(rendered.contains("line 3, in outer"));
        assert!(rendered.contains("line 2, in inner"));
        assert!(rendered.contains("Error[E007]: division by zero"));
    }

    #[test]
    fn static_diagnostics_point_at_the_offending_line() {
        colored::control::set_override(false);
        let source = "x = (1 +";
        let err = onda_parser::parse_source(source).expect_err("expected a parse error");
        let formatter = DiagnosticFormatter::new(source).with_file_name("demo.onda");
        let rendered = formatter.format(&crate::ToDiagnostic::to_diagnostic(&err));
        assert!(rendered.contains("error[E001]"));
        assert!(rendered.contains("demo.onda:1:"));
    }
}
