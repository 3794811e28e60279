use std::fmt;

use chrono::{DateTime, Utc};

/// Where the engine is in its save lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Nothing to persist.
    Idle,
    /// A mutation happened; the debounce timer is armed.
    Pending,
    /// A write is in flight.
    Saving,
    /// The last save failed; the next mutation or a manual save
    /// re-arms the cycle.
    Error,
}

impl fmt::Display for SaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveState::Idle => write!(f, "idle"),
            SaveState::Pending => write!(f, "pending"),
            SaveState::Saving => write!(f, "saving"),
            SaveState::Error => write!(f, "error"),
        }
    }
}

/// Read-only view of the engine's save status, observed by the UI.
#[derive(Debug, Clone)]
pub struct SyncStatus {
    pub state: SaveState,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            state: SaveState::Idle,
            last_saved_at: None,
            last_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status() {
        let status = SyncStatus::default();
        assert_eq!(status.state, SaveState::Idle);
        assert!(status.last_saved_at.is_none());
        assert!(status.last_error.is_none());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SaveState::Pending.to_string(), "pending");
        assert_eq!(SaveState::Error.to_string(), "error");
    }
}
