use crate::Result;
use snip_core::{ClickLedger, ShortCode, Shortener, UrlStats};
use std::sync::Arc;
use tracing::debug;

/// Joins registry records with their clicks.
#[derive(Clone)]
pub struct StatsService {
    shortener: Arc<dyn Shortener>,
    ledger: Arc<dyn ClickLedger>,
}

impl StatsService {
    pub fn new(shortener: Arc<dyn Shortener>, ledger: Arc<dyn ClickLedger>) -> Self {
        Self { shortener, ledger }
    }

    /// Stats for every live record, newest first.
    ///
    /// Records created at the same instant are ordered by id, highest first.
    /// Expired records are included.
    pub async fn stats_all(&self) -> Result<Vec<UrlStats>> {
        let mut records = self.shortener.list().await?;
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let mut stats = Vec::with_capacity(records.len());
        for record in records {
            let clicks = self.ledger.list_for(&record.token).await?;
            stats.push(UrlStats::new(record, clicks));
        }
        Ok(stats)
    }

    /// Stats for a single record. Fails with `NotFound` if the code has no
    /// record, even when stray clicks for it exist.
    pub async fn stats_for(&self, code: &ShortCode) -> Result<UrlStats> {
        let record = self.shortener.get(code).await?;
        let clicks = self.ledger.list_for(code).await?;
        Ok(UrlStats::new(record, clicks))
    }

    /// Deletes a record and then its clicks.
    ///
    /// The ledger is only touched once the registry delete succeeded.
    pub async fn remove_url(&self, code: &ShortCode) -> Result<()> {
        let record = self.shortener.delete(code).await?;
        let clicks = self.ledger.delete_for(code).await?;
        debug!(code = %code, id = record.id, clicks, "removed url");
        Ok(())
    }
}
