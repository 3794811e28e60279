//! Bunkboard Data Core
//!
//! The data and synchronization layer of the Bunkboard event-housing
//! dashboard: the housing document, its pure mutation catalogue, the
//! versioned remote document store, and the debounced autosave engine.
//!
//! # Usage
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use bunkboard::{Config, GitHubStore, Group, SyncEngine};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//! let store = GitHubStore::from_config(&config)?;
//! let engine = SyncEngine::with_debounce(store, Duration::from_millis(config.debounce_ms));
//!
//! engine.load().await;
//! engine.add_group(Group::new("g1", "St. Mary"))?;
//! // Persisted automatically after the debounce window; or:
//! engine.save_now().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod mutations;
pub mod store;
pub mod sync;

pub use config::{Config, ConfigError, StoreConfig};
pub use models::{
    AdaIndividual, AssignmentMap, DefaultNotes, Gender, Group, HousingAssignments,
    HousingDocument, MealSchedule, Room, RoomType,
};
pub use mutations::MutationError;
pub use store::{DocumentStore, GitHubStore, StoreError};
pub use sync::{SaveState, SyncEngine, SyncStatus, DEFAULT_DEBOUNCE};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
