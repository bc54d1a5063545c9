use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL mapping
///
/// `hits` is the remaining monthly quota; `None` means the current cycle
/// has not been touched yet, which is a valid live state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortUrl {
    pub target: String,
    pub shortcode: String,
    #[serde(default)]
    pub hits: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortUrl {
    pub fn new<T: Into<String>, C: Into<String>>(target: T, shortcode: C) -> Self {
        Self {
            target: target.into(),
            shortcode: shortcode.into(),
            hits: None,
            expires_at: None,
        }
    }
}
