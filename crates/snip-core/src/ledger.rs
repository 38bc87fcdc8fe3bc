use crate::error::ShortenerError;
use crate::record::{ClickMetadata, ClickRecord};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

/// The click ledger.
///
/// Appends never check that the code still resolves; a click racing a
/// deletion is accepted.
#[async_trait]
pub trait ClickLedger: Send + Sync + 'static {
    /// Records a click on `code` at the current time.
    async fn append(&self, code: &ShortCode, metadata: ClickMetadata) -> Result<ClickRecord>;

    /// Clicks for `code`, oldest first.
    async fn list_for(&self, code: &ShortCode) -> Result<Vec<ClickRecord>>;

    async fn list_all(&self) -> Result<Vec<ClickRecord>>;

    /// Drops every click for `code`. Returns how many were dropped.
    async fn delete_for(&self, code: &ShortCode) -> Result<usize>;

    /// Drops every click. Returns how many were dropped.
    async fn clear(&self) -> Result<usize>;
}
