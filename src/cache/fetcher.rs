//! Boundary to the remote configuration source of truth
//!
//! The cache layer only consumes this trait; concrete fetchers (an HTTP
//! control-plane client, a test double) live with the deployment, not
//! here. Fetch failures propagate unchanged through the pull/force paths.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// Metadata describing one fetched configuration version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    pub version: u64,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// ISO-8601 instant at which the document was fetched
    pub fetched_at: String,
}

/// One successful fetch: the resolved version, the document, its metadata
#[derive(Debug, Clone)]
pub struct FetchedConfig {
    pub version: u64,
    pub document: Value,
    pub metadata: ConfigMetadata,
}

#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    /// Fetch the newest deployed configuration, resolving its version.
    async fn fetch_latest(&self) -> Result<FetchedConfig>;

    /// Fetch one specific hosted configuration version.
    async fn fetch_version(&self, version: u64) -> Result<FetchedConfig>;
}
