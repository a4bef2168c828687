//! Error kinds for assist operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to decide how to react: a malformed tree is reported
/// back to the tree producer, a malformed request back to the editor integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred
    Unexpected,

    /// The requested operation is not supported
    Unsupported,

    /// Invalid configuration file or values
    ConfigInvalid,

    // =========================================================================
    // Program tree errors
    // =========================================================================
    /// A node refers to a child id that is not in the arena
    InvalidNodeRef,

    /// A child's source range escapes its parent's range
    RangeViolation,

    /// A node is reachable from itself through child or rewrite links
    CyclicNodeRef,

    /// The tree has no module root
    MissingRoot,

    /// A node has an unexpected kind for the slot it occupies
    UnexpectedNodeKind,

    // =========================================================================
    // Request errors
    // =========================================================================
    /// Invalid argument passed to a function
    InvalidArgument,

    /// Caret, token end or supporting end are inconsistent
    InvalidOffset,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Serialization failed
    SerializationFailed,

    /// Deserialization failed
    DeserializationFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Resource errors
    // =========================================================================
    /// Worker pool could not be created
    ResourceExhausted,

    // =========================================================================
    // Validation errors
    // =========================================================================
    /// Invariant violation
    InvariantViolation,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::ResourceExhausted | ErrorKind::IoFailed)
    }

    /// Whether the error describes a defect in the tree handed over by the producer.
    pub fn is_tree_defect(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidNodeRef
                | ErrorKind::RangeViolation
                | ErrorKind::CyclicNodeRef
                | ErrorKind::MissingRoot
                | ErrorKind::UnexpectedNodeKind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::RangeViolation.to_string(), "RangeViolation");
        assert_eq!(ErrorKind::InvalidOffset.as_str(), "InvalidOffset");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::IoFailed.is_retryable());
        assert!(ErrorKind::ResourceExhausted.is_retryable());
        assert!(!ErrorKind::InvalidNodeRef.is_retryable());
        assert!(!ErrorKind::ConfigInvalid.is_retryable());
    }

    #[test]
    fn test_tree_defects() {
        assert!(ErrorKind::MissingRoot.is_tree_defect());
        assert!(ErrorKind::RangeViolation.is_tree_defect());
        assert!(ErrorKind::CyclicNodeRef.is_tree_defect());
        assert!(!ErrorKind::InvalidOffset.is_tree_defect());
    }
}
