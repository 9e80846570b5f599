//! Text rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use weft_source::SourceDb;

/// Formats a diagnostic for output.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders in the classic compiler form:
///
/// ```text
/// top.v:4: error[E300]: net `bus` has 2 drivers
/// top.v:9:      : other driver
///         : note: only tri-state nets may have several drivers
/// ```
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let at = source_db.fileline(diag.primary_span);
        let mut out = format!("{at}: {}[{}]: {}\n", diag.severity, diag.code, diag.message);
        for label in &diag.labels {
            out.push_str(&format!(
                "{}:      : {}\n",
                source_db.fileline(label.span),
                label.message
            ));
        }
        let pad = " ".repeat(at.len());
        for note in &diag.notes {
            out.push_str(&format!("{pad}: note: {note}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use crate::label::Label;
    use weft_source::Span;

    #[test]
    fn render_error_with_label() {
        let mut db = SourceDb::new();
        let f = db.add_source("top.v", "wire a;\nassign a = b;\n".to_string());
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 300),
            "net `a` has 2 drivers",
            Span::new(f, 5, 6),
        )
        .with_label(Label::secondary(Span::new(f, 15, 16), "other driver"));

        let out = TerminalRenderer::new().render(&diag, &db);
        assert!(out.starts_with("top.v:1: error[E300]: net `a` has 2 drivers\n"));
        assert!(out.contains("top.v:2:      : other driver"));
    }

    #[test]
    fn render_internal_location_with_note() {
        let db = SourceDb::new();
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 301),
            "always process may not delay",
            Span::DUMMY,
        )
        .with_note("add an event control");
        let out = TerminalRenderer::new().render(&diag, &db);
        assert!(out.starts_with("<internal>: warning[W301]"));
        assert!(out.contains(": note: add an event control"));
    }
}
