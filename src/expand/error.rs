use std::fmt;

use crate::foundation::error::BoardError;

/// Template syntax or execution error at a byte offset of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandError {
    /// Byte offset into the template source.
    pub offset: usize,
    /// Human-readable description.
    pub message: String,
}

impl ExpandError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for ExpandError {}

impl From<ExpandError> for BoardError {
    fn from(e: ExpandError) -> Self {
        BoardError::compile(e.to_string())
    }
}
