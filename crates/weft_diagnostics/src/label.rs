//! Secondary source annotations on a diagnostic.

use serde::{Deserialize, Serialize};
use weft_source::Span;

/// Whether a label marks the main location or supporting context.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// The location the diagnostic is about.
    Primary,
    /// A related location, e.g. the other driver of a net.
    Secondary,
}

/// A span with a short message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// The annotated location.
    pub span: Span,
    /// Text printed next to the location.
    pub message: String,
    /// Primary or secondary.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}
