//! Redis key schema for the authoritative datastore
//!
//! Key layout (`<p>` = optional namespace prefix, e.g. "cloudshortener:prod"):
//!
//! ```text
//! <p>:links:<shortcode>:url              -> target URL
//! <p>:links:<shortcode>:hits:<YYYY-MM>   -> remaining monthly hit quota
//! <p>:links:counter                      -> global counter
//! <p>:users:<userId>:quota:<YYYY-MM>     -> used monthly generation quota
//! ```
//!
//! The same logical identity always maps to the same key string, whatever
//! the call site. Month-scoped keys embed the current UTC month tag.

use chrono::Utc;

use crate::utils::month_tag;

#[derive(Debug, Clone)]
pub struct RedisKeySchema {
    prefix: Option<String>,
}

impl RedisKeySchema {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn link_url_key(&self, shortcode: &str) -> String {
        self.prefixed(format!("links:{shortcode}:url"))
    }

    pub fn link_hits_key(&self, shortcode: &str) -> String {
        let month = month_tag(Utc::now());
        self.prefixed(format!("links:{shortcode}:hits:{month}"))
    }

    pub fn counter_key(&self) -> String {
        self.prefixed("links:counter".to_string())
    }

    pub fn user_quota_key(&self, user_id: &str) -> String {
        let month = month_tag(Utc::now());
        self.prefixed(format!("users:{user_id}:quota:{month}"))
    }

    fn prefixed(&self, key: String) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{key}"),
            None => key,
        }
    }
}
