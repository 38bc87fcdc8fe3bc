use crate::Result;
use async_trait::async_trait;
use snip_core::{ClickMetadata, ShortCode, UrlRecord};

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code to its stored URL record and records a click.
    ///
    /// Fails with `NotFound` or `Expired` without recording anything.
    async fn redirect(&self, code: &ShortCode, metadata: ClickMetadata) -> Result<UrlRecord>;
}
