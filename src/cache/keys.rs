//! Cache key schema for AppConfig documents
//!
//! Deliberately a separate type from the datastore key schema: the two
//! subsystems may share a physical Redis, and the fixed `cache` namespace
//! token keeps their keyspaces disjoint even then.
//!
//! ```text
//! cache:<p>:appconfig:latest             -> latest document JSON
//! cache:<p>:appconfig:latest:metadata    -> latest metadata JSON
//! cache:<p>:appconfig:v<N>               -> versioned document JSON
//! cache:<p>:appconfig:v<N>:metadata      -> versioned metadata JSON
//! ```

const CACHE_NAMESPACE: &str = "cache";

#[derive(Debug, Clone)]
pub struct CacheKeySchema {
    prefix: String,
}

impl CacheKeySchema {
    pub fn new(prefix: Option<String>) -> Self {
        let prefix = match prefix {
            Some(p) => format!("{CACHE_NAMESPACE}:{p}"),
            None => CACHE_NAMESPACE.to_string(),
        };
        Self { prefix }
    }

    pub fn appconfig_latest_key(&self) -> String {
        format!("{}:appconfig:latest", self.prefix)
    }

    pub fn appconfig_latest_metadata_key(&self) -> String {
        format!("{}:appconfig:latest:metadata", self.prefix)
    }

    pub fn appconfig_version_key(&self, version: u64) -> String {
        format!("{}:appconfig:v{}", self.prefix, version)
    }

    pub fn appconfig_metadata_key(&self, version: u64) -> String {
        format!("{}:appconfig:v{}:metadata", self.prefix, version)
    }
}
