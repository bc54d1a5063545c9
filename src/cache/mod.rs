//! Cache-aside layer over the remote configuration source of truth

pub mod appconfig;
pub mod fetcher;
pub mod keys;

pub use appconfig::{AppConfigCache, ConfigVersion};
pub use fetcher::{ConfigFetcher, ConfigMetadata, FetchedConfig};
pub use keys::CacheKeySchema;
