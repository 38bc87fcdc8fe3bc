use crate::error::Result;
use crate::record::{ClickRecord, UrlRecord};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// A read-only view of the URL registry storage.
///
/// Lookups never evaluate expiry; that is a registry concern.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the URL record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Retrieves the URL record with the given id.
    async fn get_by_id(&self, id: u64) -> Result<Option<UrlRecord>>;

    /// Checks whether a short code has ever been issued, including codes whose
    /// record has since been deleted.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;

    /// Returns every live record, in no particular order.
    async fn list(&self) -> Result<Vec<UrlRecord>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new URL record.
    ///
    /// Returns `Err(Conflict)` if the record's code was ever issued before.
    /// The check and the insert happen atomically.
    async fn insert(&self, record: UrlRecord) -> Result<()>;

    /// Deletes the URL record for a given short code.
    /// Returns the removed record, or `None` if there was none.
    ///
    /// The code stays issued and can never be inserted again.
    async fn delete(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;
}

/// Append-only storage of click events.
#[async_trait]
pub trait ClickRepository: Send + Sync + 'static {
    /// Stores a click. Clicks are never mutated after insertion.
    async fn insert(&self, click: ClickRecord) -> Result<()>;

    /// Returns the clicks recorded for a short code, oldest first.
    async fn list_for(&self, code: &ShortCode) -> Result<Vec<ClickRecord>>;

    /// Returns every click, in no particular order.
    async fn list(&self) -> Result<Vec<ClickRecord>>;

    /// Removes every click for a short code and returns how many were removed.
    async fn delete_for(&self, code: &ShortCode) -> Result<usize>;

    /// Removes every click and returns how many were removed.
    async fn clear(&self) -> Result<usize>;
}
