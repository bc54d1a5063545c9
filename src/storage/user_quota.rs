//! Per-user monthly generation quota
//!
//! Tracks how many links each user generated this calendar month. The
//! counter key is created lazily by `quota()` and expires a month after
//! creation; `increment_quota()` refuses to create keys on its own so an
//! increment can never resurrect an expired cycle.

use std::sync::Arc;

use redis::AsyncCommands;
use tracing::trace;

use crate::errors::{Result, ShortenerError};
use crate::storage::connection::GuardedRedis;
use crate::storage::keys::RedisKeySchema;
use crate::utils::ONE_MONTH_SECONDS;

pub struct UserQuotaStore {
    redis: Arc<GuardedRedis>,
    keys: RedisKeySchema,
}

impl UserQuotaStore {
    pub fn new(redis: Arc<GuardedRedis>, keys: RedisKeySchema) -> Self {
        Self { redis, keys }
    }

    /// Read the user's monthly quota counter, creating it at 0 if absent.
    ///
    /// Never fails for an unseen user. The one-month expiry is attached
    /// with `EXPIRE ... NX`, so only the initializing call sets it and
    /// later reads can't push the boundary out.
    pub async fn quota(&self, user_id: &str) -> Result<i64> {
        let quota_key = self.keys.user_quota_key(user_id);
        let mut conn = self.redis.connection().await?;

        // INCRBY 0 充当 get-or-create
        let monthly_quota: i64 = self.redis.guard(conn.incr(&quota_key, 0).await).await?;
        if monthly_quota == 0 {
            let expired: redis::RedisResult<bool> = redis::cmd("EXPIRE")
                .arg(&quota_key)
                .arg(ONE_MONTH_SECONDS)
                .arg("NX")
                .query_async(&mut conn)
                .await;
            let applied = self.redis.guard(expired).await?;
            if applied {
                trace!("Initialized monthly quota key for user '{}'", user_id);
            }
        }
        Ok(monthly_quota)
    }

    /// Increment the user's monthly counter, requiring it to exist.
    ///
    /// `quota()` must have been called at least once this cycle; otherwise
    /// fails with `UserDoesNotExist` and writes nothing.
    pub async fn increment_quota(&self, user_id: &str) -> Result<i64> {
        let quota_key = self.keys.user_quota_key(user_id);
        let mut conn = self.redis.connection().await?;

        let exists: bool = self.redis.guard(conn.exists(&quota_key).await).await?;
        if !exists {
            return Err(ShortenerError::user_does_not_exist(format!(
                "User with ID '{user_id}' does not exist."
            )));
        }

        let updated: i64 = self.redis.guard(conn.incr(&quota_key, 1).await).await?;
        Ok(updated)
    }
}
