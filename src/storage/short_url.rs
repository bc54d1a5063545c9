//! Short URL store
//!
//! Maintains the `url` and monthly `hits` keys for every live shortcode,
//! plus the global counter feeding shortcode generation. Every multi-key
//! operation goes through a single MULTI/EXEC pipeline so readers never
//! observe partial state past the batch boundary.

use std::sync::Arc;

use chrono::{Duration, Utc};
use redis::AsyncCommands;
use tracing::{debug, trace};

use crate::errors::{Result, ShortenerError};
use crate::storage::connection::GuardedRedis;
use crate::storage::keys::RedisKeySchema;
use crate::storage::models::ShortUrl;
use crate::utils::{ONE_YEAR_SECONDS, next_month_start};

pub struct ShortUrlStore {
    redis: Arc<GuardedRedis>,
    keys: RedisKeySchema,
    /// Monthly hit quota assigned to a link on first touch
    hits_quota: i64,
}

impl ShortUrlStore {
    pub fn new(redis: Arc<GuardedRedis>, keys: RedisKeySchema, hits_quota: i64) -> Self {
        Self {
            redis,
            keys,
            hits_quota,
        }
    }

    /// Insert a new short URL mapping.
    ///
    /// Fails with `AlreadyExists` when the shortcode is live, without
    /// mutating anything. Otherwise writes the url key (1 year TTL) and
    /// conditionally initializes the hits key (expiring at the next month
    /// boundary) in one transaction, so a concurrent `get` never observes
    /// a url key whose hits key is missing past the batch boundary.
    pub async fn insert(&self, short_url: &ShortUrl) -> Result<()> {
        let url_key = self.keys.link_url_key(&short_url.shortcode);
        let hits_key = self.keys.link_hits_key(&short_url.shortcode);

        let mut conn = self.redis.connection().await?;
        let exists: bool = self.redis.guard(conn.exists(&url_key).await).await?;
        if exists {
            return Err(ShortenerError::already_exists(format!(
                "Short URL with code '{}' already exists.",
                short_url.shortcode
            )));
        }

        let month_boundary = next_month_start(Utc::now());

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.cmd("SET")
            .arg(&url_key)
            .arg(&short_url.target)
            .arg("EX")
            .arg(ONE_YEAR_SECONDS)
            .ignore();
        // NX: a racing first hit() may have initialized the quota already
        pipe.cmd("SET")
            .arg(&hits_key)
            .arg(self.hits_quota)
            .arg("NX")
            .arg("EXAT")
            .arg(month_boundary.timestamp())
            .ignore();
        let applied: redis::RedisResult<()> = pipe.query_async(&mut conn).await;
        self.redis.guard(applied).await?;

        debug!(
            "Inserted short URL '{}' -> {}",
            short_url.shortcode, short_url.target
        );
        Ok(())
    }

    /// Retrieve a stored short URL mapping by shortcode.
    ///
    /// Reads the target, the remaining monthly hits and the url TTL in a
    /// single transaction; the expiry is derived from that TTL, avoiding a
    /// second round trip. A missing hits key yields `hits = None` — the
    /// monthly cycle just hasn't been touched yet.
    pub async fn get(&self, shortcode: &str) -> Result<ShortUrl> {
        let url_key = self.keys.link_url_key(shortcode);
        let hits_key = self.keys.link_hits_key(shortcode);

        let mut conn = self.redis.connection().await?;
        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.get(&url_key).get(&hits_key).ttl(&url_key);
        let fetched: redis::RedisResult<(Option<String>, Option<i64>, i64)> =
            pipe.query_async(&mut conn).await;
        let (target, hits, ttl) = self.redis.guard(fetched).await?;

        let Some(target) = target else {
            return Err(ShortenerError::not_found(format!(
                "Short URL with code '{shortcode}' not found."
            )));
        };

        trace!("Resolved short URL '{}' (ttl: {}s)", shortcode, ttl);
        Ok(ShortUrl {
            target,
            shortcode: shortcode.to_string(),
            hits,
            expires_at: Some(Utc::now() + Duration::seconds(ttl.max(0))),
        })
    }

    /// Consume one hit from the link's monthly quota.
    ///
    /// Initializes the hits key to the default quota (expiring at the next
    /// month boundary) if this cycle is untouched, then decrements, both in
    /// one transaction. Returns the post-decrement value, which goes
    /// negative once the quota is exhausted — callers read `< 0` as
    /// "exceeded" without an extra round trip. Two concurrent first
    /// touches may interleave init and decrement ordering; that narrow
    /// imprecision is accepted instead of serializing access.
    pub async fn hit(&self, shortcode: &str) -> Result<i64> {
        let url_key = self.keys.link_url_key(shortcode);
        let hits_key = self.keys.link_hits_key(shortcode);

        let mut conn = self.redis.connection().await?;
        let exists: bool = self.redis.guard(conn.exists(&url_key).await).await?;
        if !exists {
            return Err(ShortenerError::not_found(format!(
                "Short URL with code '{shortcode}' not found."
            )));
        }

        let month_boundary = next_month_start(Utc::now());

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.cmd("SET")
            .arg(&hits_key)
            .arg(self.hits_quota)
            .arg("NX")
            .arg("EXAT")
            .arg(month_boundary.timestamp())
            .ignore();
        pipe.cmd("DECRBY").arg(&hits_key).arg(1);
        let decremented: redis::RedisResult<(i64,)> = pipe.query_async(&mut conn).await;
        let (remaining,) = self.redis.guard(decremented).await?;

        trace!("Hit on '{}', {} left this month", shortcode, remaining);
        Ok(remaining)
    }

    /// Read (or increment and read) the global link counter.
    ///
    /// The counter only grows and carries no TTL; it feeds shortcode
    /// generation. A counter that was never incremented reads as 0.
    pub async fn count(&self, increment: bool) -> Result<i64> {
        let counter_key = self.keys.counter_key();
        let mut conn = self.redis.connection().await?;

        if increment {
            let value: i64 = self.redis.guard(conn.incr(&counter_key, 1).await).await?;
            Ok(value)
        } else {
            let value: Option<i64> = self.redis.guard(conn.get(&counter_key).await).await?;
            Ok(value.unwrap_or(0))
        }
    }
}
