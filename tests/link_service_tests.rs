//! Link service flow tests
//!
//! End-to-end shorten/resolve flows over a live Redis (ignored by
//! default). Every test gets its own key prefix.

use std::sync::Arc;

use cloudshortener::config::{QuotaConfig, RedisConfig};
use cloudshortener::errors::ShortenerError;
use cloudshortener::services::LinkService;
use cloudshortener::storage::{GuardedRedis, RedisKeySchema, ShortUrlStore, UserQuotaStore};

fn redis_config() -> RedisConfig {
    RedisConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string()),
        key_prefix: None,
    }
}

fn test_prefix(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("cloudshortener:test:{tag}:{nanos}")
}

async fn create_service(tag: &str, quota: QuotaConfig) -> LinkService {
    let redis = Arc::new(
        GuardedRedis::connect(&redis_config())
            .await
            .expect("these tests need a running Redis"),
    );
    let prefix = test_prefix(tag);
    let links = ShortUrlStore::new(
        redis.clone(),
        RedisKeySchema::new(Some(prefix.clone())),
        quota.link_hits,
    );
    let users = UserQuotaStore::new(redis, RedisKeySchema::new(Some(prefix)));
    LinkService::new(links, users, quota)
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_shorten_then_resolve_round_trip() {
    let service = create_service("round_trip", QuotaConfig::default()).await;

    let created = service
        .shorten("https://example.com/article/123", "user123")
        .await
        .unwrap();
    assert_eq!(created.shortcode.len(), 7);

    let resolved = service.resolve(&created.shortcode).await.unwrap();
    assert_eq!(resolved.target, "https://example.com/article/123");
    assert_eq!(resolved.hits, Some(QuotaConfig::default().link_hits - 1));
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_shorten_produces_distinct_codes() {
    let service = create_service("distinct", QuotaConfig::default()).await;

    let a = service.shorten("https://example.com/a", "user123").await.unwrap();
    let b = service.shorten("https://example.com/b", "user123").await.unwrap();
    assert_ne!(a.shortcode, b.shortcode);
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_generation_quota_limits_shortens_per_user() {
    let quota = QuotaConfig {
        user_links: 2,
        ..QuotaConfig::default()
    };
    let service = create_service("gen_quota", quota).await;

    service.shorten("https://example.com/1", "user123").await.unwrap();
    service.shorten("https://example.com/2", "user123").await.unwrap();

    let err = service
        .shorten("https://example.com/3", "user123")
        .await
        .unwrap_err();
    assert!(matches!(err, ShortenerError::QuotaExceeded(_)));

    // 其他用户不受影响
    service.shorten("https://example.com/4", "user456").await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_resolve_exhausted_link_reports_quota_exceeded() {
    let quota = QuotaConfig {
        link_hits: 1,
        ..QuotaConfig::default()
    };
    let service = create_service("hit_quota", quota).await;

    let created = service.shorten("https://example.com", "user123").await.unwrap();

    service.resolve(&created.shortcode).await.unwrap(); // 用掉唯一一次
    let err = service.resolve(&created.shortcode).await.unwrap_err();
    assert!(matches!(err, ShortenerError::QuotaExceeded(_)));
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_resolve_unknown_code_is_not_found() {
    let service = create_service("resolve_missing", QuotaConfig::default()).await;

    let err = service.resolve("zzzzzzz").await.unwrap_err();
    assert!(matches!(err, ShortenerError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_shorten_rejects_invalid_target_without_consuming_quota() {
    let service = create_service("bad_target", QuotaConfig::default()).await;

    let err = service
        .shorten("javascript:alert(1)", "user123")
        .await
        .unwrap_err();
    assert!(matches!(err, ShortenerError::Validation(_)));

    // 校验失败发生在任何配额消耗之前
    let created = service.shorten("https://example.com", "user123").await.unwrap();
    assert!(!created.shortcode.is_empty());
}
