//! GitHub-backed document store.
//!
//! The document is a single JSON file in a repository. Reads go through
//! the raw-content host (no credential needed); the version token and
//! write paths use the authenticated Contents API. The version token is
//! the file's blob SHA, passed back as the `sha` precondition on writes.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::{Config, StoreConfig};
use crate::models::HousingDocument;

use super::{DocumentStore, StoreError};

/// GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Raw file content host, used for unauthenticated reads.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

// The GitHub API rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("bunkboard/", env!("CARGO_PKG_VERSION"));

const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// Document store backed by a file in a GitHub repository.
pub struct GitHubStore {
    config: StoreConfig,
    client: reqwest::Client,
}

impl GitHubStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a store from application config.
    ///
    /// Returns an error if the store location is not configured.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        if !config.store.is_configured() {
            return Err(StoreError::NotConfigured);
        }
        Ok(Self::new(config.store.clone()))
    }

    fn token(&self) -> Result<&str, StoreError> {
        match self.config.token.as_deref() {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(StoreError::NotConfigured),
        }
    }

    /// Raw read URL: `https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path}`.
    fn raw_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            RAW_CONTENT_BASE,
            self.config.owner,
            self.config.repo,
            self.config.branch,
            urlencoding::encode(&self.config.file_path)
        )
    }

    /// Contents API URL: `https://api.github.com/repos/{owner}/{repo}/contents/{path}`.
    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            GITHUB_API_BASE,
            self.config.owner,
            self.config.repo,
            urlencoding::encode(&self.config.file_path)
        )
    }

    fn commit_message() -> String {
        format!(
            "Update housing data - {}",
            Utc::now().format("%Y-%m-%d %H:%M UTC")
        )
    }
}

/// Maps a failed metadata-read status onto the error taxonomy.
fn read_error(status: StatusCode, message: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Auth(message),
        _ => StoreError::Transport(message),
    }
}

/// Maps a failed write status onto the error taxonomy.
///
/// GitHub has signalled a stale `sha` precondition with both 409 and
/// 422 across API revisions; both are conflicts.
fn write_error(status: StatusCode, message: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Auth(message),
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => StoreError::Conflict(message),
        _ => StoreError::Transport(message),
    }
}

/// Extracts the API's error message from a failure body, if any.
async fn api_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v["message"].as_str().map(String::from))
        .unwrap_or_else(|| format!("HTTP {}", status))
}

#[async_trait]
impl DocumentStore for GitHubStore {
    async fn load(&self) -> Result<HousingDocument, StoreError> {
        let response = self
            .client
            .get(self.raw_url())
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("no document in store yet, using the default skeleton");
            return Ok(HousingDocument::default_skeleton());
        }
        if !response.status().is_success() {
            return Err(StoreError::Transport(format!(
                "load failed: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<HousingDocument>()
            .await
            .map_err(|e| StoreError::Format(e.to_string()))
    }

    async fn current_version_token(&self) -> Result<Option<String>, StoreError> {
        let token = self.token()?;
        let url = format!("{}?ref={}", self.contents_url(), self.config.branch);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("token {}", token))
            .header("Accept", ACCEPT_JSON)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            // File doesn't exist yet; first write creates it.
            return Ok(None);
        }
        let status = response.status();
        if !status.is_success() {
            return Err(read_error(status, api_message(response).await));
        }

        let meta: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StoreError::Format(e.to_string()))?;
        let sha = meta["sha"]
            .as_str()
            .ok_or_else(|| StoreError::Format("file metadata missing sha".to_string()))?;
        Ok(Some(sha.to_string()))
    }

    async fn write(
        &self,
        document: &HousingDocument,
        expected_token: Option<&str>,
    ) -> Result<String, StoreError> {
        let token = self.token()?;

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Format(e.to_string()))?;
        let mut body = serde_json::json!({
            "message": Self::commit_message(),
            "content": BASE64.encode(content.as_bytes()),
            "branch": self.config.branch,
        });
        // Include the sha only when a revision exists; omitting it on an
        // existing file is itself rejected by the API.
        if let Some(sha) = expected_token {
            body["sha"] = serde_json::Value::String(sha.to_string());
        }

        debug!(
            conditional = expected_token.is_some(),
            "writing document revision"
        );

        let response = self
            .client
            .put(self.contents_url())
            .header("Authorization", format!("token {}", token))
            .header("Accept", ACCEPT_JSON)
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(write_error(status, api_message(response).await));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StoreError::Format(e.to_string()))?;
        let new_token = result["content"]["sha"]
            .as_str()
            .ok_or_else(|| StoreError::Format("write response missing content sha".to_string()))?;
        Ok(new_token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GitHubStore {
        GitHubStore::new(StoreConfig {
            owner: "m2k".to_string(),
            repo: "m2k.github.io".to_string(),
            branch: "main".to_string(),
            file_path: "housing data (1).json".to_string(),
            token: Some("test-token".to_string()),
        })
    }

    #[test]
    fn test_raw_url_encodes_path() {
        let url = store().raw_url();
        assert_eq!(
            url,
            "https://raw.githubusercontent.com/m2k/m2k.github.io/main/housing%20data%20%281%29.json"
        );
    }

    #[test]
    fn test_contents_url() {
        let url = store().contents_url();
        assert_eq!(
            url,
            "https://api.github.com/repos/m2k/m2k.github.io/contents/housing%20data%20%281%29.json"
        );
    }

    #[test]
    fn test_token_missing() {
        let store = GitHubStore::new(StoreConfig::default());
        assert!(matches!(store.token(), Err(StoreError::NotConfigured)));
    }

    #[test]
    fn test_from_config_requires_location() {
        let config = Config::default();
        assert!(matches!(
            GitHubStore::from_config(&config),
            Err(StoreError::NotConfigured)
        ));
    }

    #[test]
    fn test_write_error_mapping() {
        let conflict = write_error(StatusCode::CONFLICT, "sha mismatch".to_string());
        assert!(conflict.is_conflict());
        let stale = write_error(StatusCode::UNPROCESSABLE_ENTITY, "sha".to_string());
        assert!(stale.is_conflict());
        assert!(matches!(
            write_error(StatusCode::UNAUTHORIZED, "bad token".to_string()),
            StoreError::Auth(_)
        ));
        assert!(matches!(
            write_error(StatusCode::BAD_GATEWAY, "".to_string()),
            StoreError::Transport(_)
        ));
    }

    #[test]
    fn test_read_error_mapping() {
        assert!(matches!(
            read_error(StatusCode::FORBIDDEN, "".to_string()),
            StoreError::Auth(_)
        ));
        assert!(matches!(
            read_error(StatusCode::INTERNAL_SERVER_ERROR, "".to_string()),
            StoreError::Transport(_)
        ));
    }

    #[test]
    fn test_commit_message_format() {
        let message = GitHubStore::commit_message();
        assert!(message.starts_with("Update housing data - "));
        assert!(message.ends_with("UTC"));
    }
}
