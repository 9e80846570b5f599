//! Accumulator for diagnostics emitted while the netlist is built.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::cell::{Cell, RefCell};

/// Collects diagnostics so construction can continue past the first problem.
///
/// Netlist construction is single-threaded, so the sink uses interior
/// mutability instead of locks and every method takes `&self`. An optional
/// error limit stops *recording* errors once reached; they are still counted
/// so [`has_errors`](Self::has_errors) stays truthful.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
    error_count: Cell<usize>,
    warning_count: Cell<usize>,
    error_limit: Option<usize>,
}

impl DiagnosticSink {
    /// Creates an empty sink with no error limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink that records at most `limit` errors.
    pub fn with_error_limit(limit: usize) -> Self {
        Self {
            error_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        match diag.severity {
            Severity::Error => {
                let seen = self.error_count.get();
                self.error_count.set(seen + 1);
                if self.error_limit.is_some_and(|limit| seen >= limit) {
                    return;
                }
            }
            Severity::Warning => self.warning_count.set(self.warning_count.get() + 1),
            Severity::Note => {}
        }
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Returns `true` if any error was emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.get() > 0
    }

    /// Returns the number of errors emitted, recorded or not.
    pub fn error_count(&self) -> usize {
        self.error_count.get()
    }

    /// Returns the number of warnings emitted.
    pub fn warning_count(&self) -> usize {
        self.warning_count.get()
    }

    /// Returns `true` once the error limit has been exceeded.
    pub fn limit_reached(&self) -> bool {
        self.error_limit
            .is_some_and(|limit| self.error_count.get() > limit)
    }

    /// Takes all recorded diagnostics, leaving the sink empty. Counts are kept.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    /// Returns a copy of the recorded diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}
