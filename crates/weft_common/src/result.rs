//! Result type for compiler-internal failures.

/// The result type of fallible internal operations.
///
/// `Err` means weft itself misbehaved (an IR built in an impossible shape),
/// not that the user's design is wrong. Design problems are reported as
/// diagnostics and the operation still succeeds.
pub type WeftResult<T> = Result<T, InternalError>;

/// An internal compiler error.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// What went wrong, prefixed with the construct location when known.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates an internal error tagged with a `file:line` location.
    pub fn at(fileline: &str, message: impl std::fmt::Display) -> Self {
        Self {
            message: format!("{fileline}: {message}"),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
