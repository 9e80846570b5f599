//! Diagnostic codes and helper functions for netlist construction checks.
//!
//! Numbers `300`--`302` identify the checks. Whether a finding is an `E` or
//! a `W` depends on the level configured for the check, except that a
//! process which only *might* not delay is always a warning.

use weft_config::CheckLevel;
use weft_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};
use weft_source::Span;

/// A net driven by several outputs without a resolving net kind.
pub const E300: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 300,
};

/// [`E300`] reported at warning level.
pub const W300: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 300,
};

/// An `always` process that never advances time.
pub const E301: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 301,
};

/// An `always` process that may not advance time.
pub const W301: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 301,
};

/// [`W302`] reported at error level.
pub const E302: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 302,
};

/// A net with loads but no driver.
pub const W302: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 302,
};

fn leveled(level: CheckLevel, number: u16, message: String, span: Span) -> Diagnostic {
    match level {
        CheckLevel::Deny => {
            Diagnostic::error(DiagnosticCode::new(Category::Error, number), message, span)
        }
        CheckLevel::Warn | CheckLevel::Allow => {
            Diagnostic::warning(DiagnosticCode::new(Category::Warning, number), message, span)
        }
    }
}

/// Creates a multiple-driver diagnostic.
pub fn multi_driver(
    level: CheckLevel,
    net: &str,
    drivers: u32,
    span: Span,
    other_driver: Span,
) -> Diagnostic {
    leveled(
        level,
        300,
        format!("net `{net}` has {drivers} drivers"),
        span,
    )
    .with_label(Label::secondary(other_driver, "other driver"))
    .with_note("only tri, triand, trior, wand and wor nets may have several drivers")
}

/// Creates a zero-delay `always` diagnostic.
pub fn always_without_delay(level: CheckLevel, span: Span) -> Diagnostic {
    leveled(
        level,
        301,
        "always process does not delay; simulation would hang".to_string(),
        span,
    )
    .with_note("add a delay or an event control")
}

/// Creates a possibly-zero-delay `always` warning.
pub fn always_may_not_delay(span: Span) -> Diagnostic {
    Diagnostic::warning(
        W301,
        "always process may not delay on every path",
        span,
    )
}

/// Creates an undriven-net diagnostic.
pub fn floating_net(level: CheckLevel, net: &str, loads: u32, span: Span) -> Diagnostic {
    leveled(
        level,
        302,
        format!("net `{net}` has {loads} load(s) but no driver"),
        span,
    )
}

/// Returns `true` if `diag` should block code generation.
pub fn is_blocking(diag: &Diagnostic) -> bool {
    diag.severity.is_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_picks_category() {
        let d = multi_driver(CheckLevel::Deny, "n", 2, Span::DUMMY, Span::DUMMY);
        assert_eq!(d.code, E300);
        assert!(is_blocking(&d));
        let w = multi_driver(CheckLevel::Warn, "n", 2, Span::DUMMY, Span::DUMMY);
        assert_eq!(w.code, W300);
        assert!(!is_blocking(&w));
        assert_eq!(w.labels.len(), 1);
    }

    #[test]
    fn messages() {
        let d = floating_net(CheckLevel::Warn, "data", 3, Span::DUMMY);
        assert_eq!(d.code, W302);
        assert_eq!(d.message, "net `data` has 3 load(s) but no driver");
        assert_eq!(floating_net(CheckLevel::Deny, "d", 1, Span::DUMMY).code, E302);
        assert_eq!(always_without_delay(CheckLevel::Deny, Span::DUMMY).code, E301);
        assert_eq!(always_may_not_delay(Span::DUMMY).code, W301);
    }
}
