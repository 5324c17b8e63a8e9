use thiserror::Error;

use crate::types::MediaKind;

/// Why a file was left with its original name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no {kind} match for '{title}'")]
    LookupNotFound { kind: MediaKind, title: String },

    #[error("no usable title")]
    ClassificationAmbiguous,

    #[error("metadata service error: {0}")]
    ServiceError(String),

    #[error("rename failed: {0}")]
    RenameFailure(String),
}

impl SkipReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::LookupNotFound { .. } => "lookup_not_found",
            Self::ClassificationAmbiguous => "classification_ambiguous",
            Self::ServiceError(_) => "service_error",
            Self::RenameFailure(_) => "rename_failure",
        }
    }

    /// Rename failures are counted separately from lookup skips.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::RenameFailure(_))
    }
}
