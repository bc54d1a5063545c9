//! Cache-aside layer for AppConfig documents
//!
//! Reads go to Redis first; on a miss the remote fetcher is consulted
//! (when `pull` allows it) and the result is written back — the warm-up —
//! before being returned. `force` skips the read entirely and always
//! refreshes. A document and its metadata are written in the same
//! MULTI/EXEC batch, and a request for `latest` additionally duplicates
//! both into the `latest` keys so subsequent latest reads stay one GET.

use std::fmt;
use std::sync::Arc;

use redis::AsyncCommands;
use serde_json::Value;
use tracing::{debug, trace};

use crate::cache::fetcher::{ConfigFetcher, ConfigMetadata, FetchedConfig};
use crate::cache::keys::CacheKeySchema;
use crate::errors::{Result, ShortenerError};
use crate::storage::GuardedRedis;

/// Addressable coordinate of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigVersion {
    Latest,
    Number(u64),
}

impl From<u64> for ConfigVersion {
    fn from(version: u64) -> Self {
        ConfigVersion::Number(version)
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigVersion::Latest => write!(f, "latest"),
            ConfigVersion::Number(version) => write!(f, "v{version}"),
        }
    }
}

pub struct AppConfigCache {
    redis: Arc<GuardedRedis>,
    keys: CacheKeySchema,
    fetcher: Arc<dyn ConfigFetcher>,
}

impl AppConfigCache {
    pub fn new(
        redis: Arc<GuardedRedis>,
        prefix: Option<String>,
        fetcher: Arc<dyn ConfigFetcher>,
    ) -> Self {
        Self {
            redis,
            keys: CacheKeySchema::new(prefix),
            fetcher,
        }
    }

    /// Latest document, warming the cache on a miss when `pull` is set.
    pub async fn latest(&self, pull: bool) -> Result<Value> {
        self.get(ConfigVersion::Latest, pull, false).await
    }

    /// Version number of the newest cached (or pulled) configuration.
    pub async fn current_version(&self, pull: bool) -> Result<u64> {
        let metadata = self.metadata(ConfigVersion::Latest, pull, false).await?;
        Ok(metadata.version)
    }

    /// Force-refresh the latest document and every key derived from it.
    ///
    /// Returns the resolved version. Used by cache-warming jobs.
    pub async fn warm(&self) -> Result<u64> {
        let fetched = self.pull_appconfig(ConfigVersion::Latest).await?;
        Ok(fetched.version)
    }

    /// Retrieve a configuration document.
    ///
    /// - `force`: skip the cache read, always fetch and warm.
    /// - `pull`: on a cache miss, fetch and warm instead of failing.
    /// - neither: a miss is a `CacheMiss` error labelled with the version.
    pub async fn get(&self, version: ConfigVersion, pull: bool, force: bool) -> Result<Value> {
        if force {
            let fetched = self.pull_appconfig(version).await?;
            return Ok(fetched.document);
        }

        let key = match version {
            ConfigVersion::Latest => self.keys.appconfig_latest_key(),
            ConfigVersion::Number(n) => self.keys.appconfig_version_key(n),
        };
        let mut conn = self.redis.connection().await?;
        let blob: Option<String> = self.redis.guard(conn.get(&key).await).await?;

        if let Some(blob) = blob {
            trace!("AppConfig cache hit for {}", version);
            return Ok(serde_json::from_str(&blob)?);
        }

        if !pull {
            return Err(ShortenerError::cache_miss(format!(
                "AppConfig {version} not found in cache and pull=false."
            )));
        }

        let fetched = self.pull_appconfig(version).await?;
        Ok(fetched.document)
    }

    /// Retrieve the metadata of a configuration version.
    ///
    /// Same pull/force semantics as [`get`](Self::get).
    pub async fn metadata(
        &self,
        version: ConfigVersion,
        pull: bool,
        force: bool,
    ) -> Result<ConfigMetadata> {
        if force {
            let fetched = self.pull_appconfig(version).await?;
            return Ok(fetched.metadata);
        }

        let key = match version {
            ConfigVersion::Latest => self.keys.appconfig_latest_metadata_key(),
            ConfigVersion::Number(n) => self.keys.appconfig_metadata_key(n),
        };
        let mut conn = self.redis.connection().await?;
        let blob: Option<String> = self.redis.guard(conn.get(&key).await).await?;

        if let Some(blob) = blob {
            trace!("AppConfig metadata cache hit for {}", version);
            return Ok(serde_json::from_str(&blob)?);
        }

        if !pull {
            return Err(ShortenerError::cache_miss(format!(
                "AppConfig {version} metadata not found in cache and pull=false."
            )));
        }

        let fetched = self.pull_appconfig(version).await?;
        Ok(fetched.metadata)
    }

    /// Fetch the requested version from upstream and warm the cache.
    ///
    /// Fetcher failures propagate unchanged; a failed warm-up after a
    /// successful fetch surfaces as `CachePut`.
    async fn pull_appconfig(&self, version: ConfigVersion) -> Result<FetchedConfig> {
        let fetched = match version {
            ConfigVersion::Latest => self.fetcher.fetch_latest().await?,
            ConfigVersion::Number(n) => self.fetcher.fetch_version(n).await?,
        };
        self.warm_up_cache(&fetched, version == ConfigVersion::Latest)
            .await?;
        Ok(fetched)
    }

    /// Write a fetched document + metadata back to the cache.
    ///
    /// One MULTI/EXEC batch: versioned document and metadata, plus the
    /// `latest` duplicates when the request targeted latest. Explicit
    /// version requests never touch the latest keys.
    async fn warm_up_cache(&self, fetched: &FetchedConfig, latest: bool) -> Result<()> {
        let content_key = self.keys.appconfig_version_key(fetched.version);
        let meta_key = self.keys.appconfig_metadata_key(fetched.version);

        let document_json = serde_json::to_string(&fetched.document)?;
        let metadata_json = serde_json::to_string(&fetched.metadata)?;

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.set(&content_key, &document_json).ignore();
        pipe.set(&meta_key, &metadata_json).ignore();
        if latest {
            // latest 键始终与最新版本的内容逐字节一致
            pipe.set(self.keys.appconfig_latest_key(), &document_json)
                .ignore();
            pipe.set(self.keys.appconfig_latest_metadata_key(), &metadata_json)
                .ignore();
        }

        let mut conn = match self.redis.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                return Err(ShortenerError::cache_put(format!(
                    "Failed to write AppConfig v{} to cache: {}",
                    fetched.version, e
                )));
            }
        };
        let written: redis::RedisResult<()> = pipe.query_async(&mut conn).await;
        if let Err(e) = written {
            self.redis.reset_connection().await;
            return Err(ShortenerError::cache_put(format!(
                "Failed to write AppConfig v{} to cache: {}",
                fetched.version, e
            )));
        }

        debug!(
            "Warmed AppConfig cache with v{}{}",
            fetched.version,
            if latest { " (+latest)" } else { "" }
        );
        Ok(())
    }
}
