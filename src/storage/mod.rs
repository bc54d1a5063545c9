//! Redis-backed stores for short URLs and user quotas
//!
//! All stores share one guarded client handle; multi-key operations run as
//! MULTI/EXEC pipelines and connectivity failures surface as typed
//! `DataStore` errors with the target endpoint attached.

pub mod connection;
pub mod keys;
pub mod models;
pub mod short_url;
pub mod user_quota;

pub use connection::{GuardedRedis, RedisEndpoint};
pub use keys::RedisKeySchema;
pub use models::ShortUrl;
pub use short_url::ShortUrlStore;
pub use user_quota::UserQuotaStore;
