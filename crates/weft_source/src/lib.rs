//! Source locations for netlist constructs and diagnostics.
//!
//! Every netlist object remembers the [`Span`] of the declaration or
//! statement that produced it. The [`SourceDb`] turns a span back into the
//! `file:line` form used in internal-error messages and diagnostics.

#![warn(missing_docs)]

pub mod file_id;
pub mod source_db;
pub mod span;

pub use file_id::FileId;
pub use source_db::{SourceDb, SourceFile};
pub use span::Span;
