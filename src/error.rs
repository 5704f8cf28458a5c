//! Error types shared by every generation stage.

use serde::Serialize;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KolamError>;

/// Failures that can occur while validating parameters or generating a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KolamError {
    /// A numeric or enum input was out of range or of the wrong shape.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The requested pattern kind is not registered in the catalog.
    #[error("unknown pattern kind `{0}`")]
    UnknownPatternKind(String),

    /// A coordinate entry was missing `x`/`y` or held a non-numeric value.
    #[error("malformed coordinate at position {index}: {reason}")]
    MalformedCoordinateInput { index: usize, reason: String },

    /// Generation failed for a reason the caller could not have prevented.
    #[error("internal generation failure: {0}")]
    Internal(String),
}

impl KolamError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCoordinateInput {
            index,
            reason: reason.into(),
        }
    }

    /// Stable snake_case tag identifying the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::UnknownPatternKind(_) => "unknown_pattern_kind",
            Self::MalformedCoordinateInput { .. } => "malformed_coordinate_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Structured error handed back to callers: a kind tag plus a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
}

impl From<&KolamError> for ErrorReport {
    fn from(err: &KolamError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<KolamError> for ErrorReport {
    fn from(err: KolamError) -> Self {
        Self::from(&err)
    }
}
