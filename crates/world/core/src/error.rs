//! Common error infrastructure shared by every crate in the workspace.
//!
//! Concern-specific errors (`CatalogError` here, pipeline and driver errors in
//! the editor) implement [`WorldError`] so callers can decide how to react
//! without matching on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the operation can be retried, possibly after user action
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency that indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common interface for all world and editor errors.
pub trait WorldError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;

    /// Stable code for logs, e.g. `"CATALOG_UNKNOWN_KEY"`.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_covers_fatal() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
