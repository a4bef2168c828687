//! Error status for retry logic

use std::fmt;

/// Whether an operation that failed with this error is worth repeating.
///
/// Almost everything in assist is deterministic: a bad tree stays bad. Only
/// file access and worker pool setup can fail transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorStatus {
    /// Repeating the call with the same input fails the same way.
    #[default]
    Permanent,

    /// Repeating the call may succeed (e.g. a file briefly locked by the editor).
    Temporary,

    /// Was temporary, kept failing across retries.
    Persistent,
}

impl ErrorStatus {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorStatus::Temporary)
    }

    /// Downgrade a temporary status once retries are exhausted
    pub fn persist(self) -> Self {
        match self {
            ErrorStatus::Temporary => ErrorStatus::Persistent,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::Permanent => "permanent",
            ErrorStatus::Temporary => "temporary",
            ErrorStatus::Persistent => "persistent",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
