//! Key schema tests
//!
//! The key layout is a wire contract shared with every other consumer of
//! the datastore, so these assert the exact strings.

use chrono::Utc;
use cloudshortener::cache::CacheKeySchema;
use cloudshortener::storage::RedisKeySchema;
use cloudshortener::utils::month_tag;

fn this_month() -> String {
    month_tag(Utc::now())
}

// =============================================================================
// 数据存储键
// =============================================================================

#[cfg(test)]
mod redis_key_schema_tests {
    use super::*;

    #[test]
    fn test_link_url_key_without_prefix() {
        let keys = RedisKeySchema::new(None);
        assert_eq!(keys.link_url_key("abc123"), "links:abc123:url");
    }

    #[test]
    fn test_link_url_key_with_prefix() {
        let keys = RedisKeySchema::new(Some("cloudshortener:prod".to_string()));
        assert_eq!(
            keys.link_url_key("abc123"),
            "cloudshortener:prod:links:abc123:url"
        );
    }

    #[test]
    fn test_link_hits_key_embeds_current_month() {
        let keys = RedisKeySchema::new(None);
        assert_eq!(
            keys.link_hits_key("abc123"),
            format!("links:abc123:hits:{}", this_month())
        );
    }

    #[test]
    fn test_counter_key() {
        let keys = RedisKeySchema::new(Some("app:dev".to_string()));
        assert_eq!(keys.counter_key(), "app:dev:links:counter");
    }

    #[test]
    fn test_user_quota_key_embeds_current_month() {
        let keys = RedisKeySchema::new(None);
        assert_eq!(
            keys.user_quota_key("user123"),
            format!("users:user123:quota:{}", this_month())
        );
    }

    #[test]
    fn test_same_identity_same_key() {
        let a = RedisKeySchema::new(Some("app:dev".to_string()));
        let b = RedisKeySchema::new(Some("app:dev".to_string()));
        assert_eq!(a.link_url_key("zzz"), b.link_url_key("zzz"));
    }
}

// =============================================================================
// 缓存键
// =============================================================================

#[cfg(test)]
mod cache_key_schema_tests {
    use super::*;

    #[test]
    fn test_latest_keys_with_prefix() {
        let keys = CacheKeySchema::new(Some("cloudshortener:dev".to_string()));
        assert_eq!(
            keys.appconfig_latest_key(),
            "cache:cloudshortener:dev:appconfig:latest"
        );
        assert_eq!(
            keys.appconfig_latest_metadata_key(),
            "cache:cloudshortener:dev:appconfig:latest:metadata"
        );
    }

    #[test]
    fn test_versioned_keys_with_prefix() {
        let keys = CacheKeySchema::new(Some("cloudshortener:dev".to_string()));
        assert_eq!(
            keys.appconfig_version_key(12),
            "cache:cloudshortener:dev:appconfig:v12"
        );
        assert_eq!(
            keys.appconfig_metadata_key(12),
            "cache:cloudshortener:dev:appconfig:v12:metadata"
        );
    }

    #[test]
    fn test_cache_namespace_token_applies_without_prefix() {
        let keys = CacheKeySchema::new(None);
        assert_eq!(keys.appconfig_latest_key(), "cache:appconfig:latest");
        assert_eq!(keys.appconfig_version_key(3), "cache:appconfig:v3");
    }

    #[test]
    fn test_cache_and_datastore_schemas_never_collide() {
        // 共用一个物理 Redis 时，cache: 命名空间保证两套键不冲突
        let store_keys = RedisKeySchema::new(Some("app".to_string()));
        let cache_keys = CacheKeySchema::new(Some("app".to_string()));

        assert!(store_keys.counter_key().starts_with("app:"));
        assert!(cache_keys.appconfig_latest_key().starts_with("cache:app:"));
    }
}
