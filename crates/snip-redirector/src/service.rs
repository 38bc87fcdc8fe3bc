use std::sync::Arc;

use crate::redirector::Redirector;
use async_trait::async_trait;
use snip_core::{ClickLedger, ClickMetadata, ShortCode, Shortener, UrlRecord};
use tracing::{debug, warn};

/// Service for handling URL redirects.
///
/// Uses the registry to resolve codes (which enforces expiry) and the ledger
/// to record each successful resolution.
#[derive(Clone)]
pub struct RedirectorService {
    shortener: Arc<dyn Shortener>,
    ledger: Arc<dyn ClickLedger>,
}

impl RedirectorService {
    /// Creates a new RedirectorService over the given registry and ledger.
    pub fn new(shortener: Arc<dyn Shortener>, ledger: Arc<dyn ClickLedger>) -> Self {
        Self { shortener, ledger }
    }

    /// Resolves a short code to its original URL and records the click.
    ///
    /// # Arguments
    ///
    /// * `code` - The short code to resolve
    /// * `metadata` - Referrer, location and user agent of the visitor
    ///
    /// # Returns
    ///
    /// * `Ok(record)` - The record if found and not expired
    /// * `Err(NotFound)` - If the code doesn't exist
    /// * `Err(Expired)` - If the record is past its expiry
    pub async fn redirect(
        &self,
        code: &ShortCode,
        metadata: ClickMetadata,
    ) -> crate::Result<UrlRecord> {
        Redirector::redirect(self, code, metadata).await
    }
}

#[async_trait]
impl Redirector for RedirectorService {
    async fn redirect(&self, code: &ShortCode, metadata: ClickMetadata) -> crate::Result<UrlRecord> {
        let record = self.shortener.resolve(code).await?;

        match self.ledger.append(code, metadata).await {
            Ok(click) => {
                debug!(code = %code, click_id = click.id, "recorded redirect");
            }
            Err(e) => {
                warn!(code = %code, error = %e, "failed to record click, redirecting anyway");
            }
        }

        Ok(record)
    }
}
