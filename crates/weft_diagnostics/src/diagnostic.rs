//! Structured diagnostic messages.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use weft_source::Span;

/// A message about the design, attributed to a source location.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the finding is.
    pub severity: Severity,
    /// Stable code identifying the kind of finding.
    pub code: DiagnosticCode,
    /// The main message.
    pub message: String,
    /// Where the finding applies.
    pub primary_span: Span,
    /// Related locations.
    pub labels: Vec<Label>,
    /// Trailing `note:` lines.
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message, span)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message, span)
    }

    /// Adds a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Error, 300);
        let diag = Diagnostic::error(code, "net `n` has 2 drivers", Span::DUMMY)
            .with_label(Label::secondary(Span::DUMMY, "other driver"))
            .with_note("only tri-state nets may have several drivers");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn warning_severity() {
        let code = DiagnosticCode::new(Category::Warning, 302);
        let diag = Diagnostic::warning(code, "floating net", Span::DUMMY);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "floating net");
    }
}
