//! Errors reported by link store implementations.

/// Failure of a single store call.
///
/// Store errors are surfaced to callers unchanged; the application layer
/// decides whether a failure counts as a read or a write failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A unique-key insert found the key already present.
    #[error("record '{0}' already exists")]
    AlreadyExists(String),

    /// The store rejected the call for lack of privileges.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Transport or backend failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}
