//! Opaque identifier for a source file.

use serde::{Deserialize, Serialize};

/// Identifies a file registered with a [`SourceDb`](crate::SourceDb).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// The file of compiler-synthesized constructs.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}
