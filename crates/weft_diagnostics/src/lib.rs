//! Diagnostics for problems found while the netlist is being built.
//!
//! A [`Diagnostic`] is attributed to a source [`Span`](weft_source::Span).
//! Builders push them into a [`DiagnosticSink`], keep going, and the driver
//! checks [`DiagnosticSink::has_errors`] before handing the netlist to a
//! backend. [`TerminalRenderer`] prints them in `file:line:` form.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
