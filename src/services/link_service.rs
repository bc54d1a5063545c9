//! Link management service
//!
//! Orchestrates the shorten and resolve flows on top of the stores:
//! target validation, per-user generation quota, counter-driven shortcode
//! generation and monthly hit accounting.

use tracing::{debug, info};
use url::Url;

use crate::config::QuotaConfig;
use crate::errors::{Result, ShortenerError};
use crate::storage::{ShortUrl, ShortUrlStore, UserQuotaStore};
use crate::utils::generate_shortcode;

pub struct LinkService {
    links: ShortUrlStore,
    users: UserQuotaStore,
    quota: QuotaConfig,
}

impl LinkService {
    pub fn new(links: ShortUrlStore, users: UserQuotaStore, quota: QuotaConfig) -> Self {
        Self {
            links,
            users,
            quota,
        }
    }

    /// Create a short URL for `target` on behalf of `user_id`.
    ///
    /// Rejects users whose monthly generation quota is exhausted before
    /// consuming a counter value. The shortcode is derived from the global
    /// counter, so every insert gets a fresh, non-sequential code.
    pub async fn shorten(&self, target: &str, user_id: &str) -> Result<ShortUrl> {
        Self::validate_target(target)?;

        let used = self.users.quota(user_id).await?;
        if used >= self.quota.user_links {
            return Err(ShortenerError::quota_exceeded(format!(
                "User '{}' exhausted the monthly generation quota ({}).",
                user_id, self.quota.user_links
            )));
        }

        let counter = self.links.count(true).await?;
        let shortcode = generate_shortcode(
            counter.max(0) as u64,
            &self.quota.shortcode_salt,
            self.quota.shortcode_length,
        )?;

        let record = ShortUrl::new(target, shortcode);
        self.links.insert(&record).await?;

        let used = self.users.increment_quota(user_id).await?;
        info!(
            "Shortened {} -> '{}' for user '{}' ({}/{} this month)",
            target, record.shortcode, user_id, used, self.quota.user_links
        );
        Ok(record)
    }

    /// Resolve a shortcode for redirection, consuming one hit.
    ///
    /// A negative post-decrement balance means the link's monthly hit
    /// quota is exhausted; the mapping itself stays live until its TTL.
    pub async fn resolve(&self, shortcode: &str) -> Result<ShortUrl> {
        let record = self.links.get(shortcode).await?;
        let remaining = self.links.hit(shortcode).await?;
        if remaining < 0 {
            debug!("Monthly hit quota exhausted for '{}'", shortcode);
            return Err(ShortenerError::quota_exceeded(format!(
                "Short URL '{shortcode}' exhausted its monthly hit quota."
            )));
        }

        Ok(ShortUrl {
            hits: Some(remaining),
            ..record
        })
    }

    /// 只允许 http/https 目标
    fn validate_target(target: &str) -> Result<()> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ShortenerError::validation("Target URL cannot be empty."));
        }

        let parsed = Url::parse(target)
            .map_err(|e| ShortenerError::validation(format!("Invalid target URL: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ShortenerError::validation(format!(
                "Target URL scheme '{scheme}:' is not allowed. Only http and https are."
            ))),
        }
    }
}
