//! Store error types.

/// Errors that can occur talking to the remote document store.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// No credential is configured; the write path is unusable.
    NotConfigured,
    /// The store rejected the credential.
    Auth(String),
    /// The version precondition failed: someone else wrote a newer
    /// revision between our token read and our write.
    Conflict(String),
    /// Network or service failure.
    Transport(String),
    /// The document could not be serialized, or the stored bytes could
    /// not be parsed.
    Format(String),
}

impl StoreError {
    /// True when the error is the compare-and-swap precondition failing.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotConfigured => {
                write!(f, "Store not configured. Set repository and token in settings.")
            }
            StoreError::Auth(e) => write!(f, "Authentication failed: {}", e),
            StoreError::Conflict(e) => write!(f, "Version conflict: {}", e),
            StoreError::Transport(e) => write!(f, "Transport error: {}", e),
            StoreError::Format(e) => write!(f, "Document format error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}
