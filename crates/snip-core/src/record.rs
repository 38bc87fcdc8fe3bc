use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored URL record in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Identifier from the shared id sequence.
    pub id: u64,
    /// The short code the URL is registered under.
    pub token: ShortCode,
    /// The original URL that was shortened.
    pub target_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record stops resolving. Always after `created_at`.
    pub expires_at: Timestamp,
}

/// Whether a record still resolves at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Active,
    Expired,
}

impl UrlRecord {
    /// A record is expired once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    pub fn status_at(&self, now: Timestamp) -> LinkStatus {
        if self.is_expired_at(now) {
            LinkStatus::Expired
        } else {
            LinkStatus::Active
        }
    }
}

/// Approximate visitor location attached to a click.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Descriptive data captured with a click. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClickMetadata {
    pub referrer: Option<String>,
    pub location: Option<Location>,
    pub user_agent: Option<String>,
}

/// One resolution event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    /// Identifier from the shared id sequence.
    pub id: u64,
    /// The short code that was resolved.
    pub token: ShortCode,
    /// When the click happened.
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub metadata: ClickMetadata,
}

/// A URL record joined with its clicks.
///
/// Output only. Build it with [`UrlStats::new`] so `click_count` always
/// matches `clicks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlStats {
    #[serde(flatten)]
    pub record: UrlRecord,
    pub click_count: usize,
    /// Clicks in ascending timestamp order.
    pub clicks: Vec<ClickRecord>,
}

impl UrlStats {
    /// Joins a record with its clicks. The count is always derived from
    /// `clicks`.
    pub fn new(record: UrlRecord, clicks: Vec<ClickRecord>) -> Self {
        Self {
            record,
            click_count: clicks.len(),
            clicks,
        }
    }
}
