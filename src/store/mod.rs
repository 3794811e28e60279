//! Remote document store: the trait the sync engine saves through, and
//! the GitHub-backed implementation.
//!
//! The store's unit of persistence is the whole document. Writes are
//! optimistic-concurrency: the caller reads the current version token,
//! then writes conditioned on it; a token mismatch is a
//! [`StoreError::Conflict`] and is never retried here.

mod error;
mod github;

use async_trait::async_trait;

pub use error::StoreError;
pub use github::GitHubStore;

use crate::models::HousingDocument;

/// A versioned single-file document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the latest persisted document. A store with no document
    /// yet returns the default skeleton rather than failing.
    async fn load(&self) -> Result<HousingDocument, StoreError>;

    /// The store's current version token for the document, or `None`
    /// if no document exists yet. Used only as a write precondition.
    async fn current_version_token(&self) -> Result<Option<String>, StoreError>;

    /// Write a new revision. When `expected_token` is given and the
    /// store's current token differs, the write fails with
    /// [`StoreError::Conflict`]. Returns the new version token.
    async fn write(
        &self,
        document: &HousingDocument,
        expected_token: Option<&str>,
    ) -> Result<String, StoreError>;
}
