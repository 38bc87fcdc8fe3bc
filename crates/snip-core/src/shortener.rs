use crate::record::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub target_url: String,
    /// Optional custom alias for the shortened URL.
    pub custom_alias: Option<ShortCode>,
    /// Minutes until the link expires. Missing or non-positive values fall
    /// back to the registry's default window.
    pub ttl_minutes: Option<i64>,
}

impl ShortenParams {
    /// Parameters with a generated code and the default expiry.
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            custom_alias: None,
            ttl_minutes: None,
        }
    }

    pub fn with_alias(mut self, alias: ShortCode) -> Self {
        self.custom_alias = Some(alias);
        self
    }

    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_minutes = Some(minutes);
        self
    }
}

/// The URL registry.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Registers a URL and returns the stored record.
    async fn shorten(&self, params: ShortenParams) -> Result<UrlRecord>;

    /// Resolves a short code for redirection.
    ///
    /// Fails with `NotFound` if the code has no record and with `Expired` if
    /// the record is past its expiry. Does not record a click.
    async fn resolve(&self, code: &ShortCode) -> Result<UrlRecord>;

    /// Looks a record up without evaluating expiry.
    async fn get(&self, code: &ShortCode) -> Result<UrlRecord>;

    /// Returns every live record, in no particular order.
    async fn list(&self) -> Result<Vec<UrlRecord>>;

    /// Deletes a shortened URL by its short code.
    ///
    /// Fails with `NotFound` if there was nothing to delete. Clicks are left
    /// untouched.
    async fn delete(&self, code: &ShortCode) -> Result<UrlRecord>;
}
