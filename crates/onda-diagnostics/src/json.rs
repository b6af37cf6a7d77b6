// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON emission for tooling.

use crate::Diagnostic;

/// Serialize diagnostics as a JSON array.
pub fn to_json(diagnostics: &[Diagnostic]) -> String {
    serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use onda_ast::Span;

    #[test]
    fn diagnostics_serialize_with_code_and_span() {
        let diag = Diagnostic::error("division by zero")
            .with_code("E007")
            .with_span(Span::new(4, 9));
        let json = to_json(&[diag]);
        assert!(json.contains("\"E007\""));
        assert!(json.contains("\"start\": 4"));
    }
}
