use async_trait::async_trait;
use snip_core::{
    ClickLedger, ClickMetadata, ClickRecord, ClickRepository, Clock, IdAllocator, ShortCode,
    ShortenerError, SystemClock,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, ShortenerError>;

/// [`ClickLedger`] over a [`ClickRepository`].
///
/// Click ids come from the same allocator as url ids. Appends are
/// serialized, so per-code insertion order matches timestamp order.
pub struct LedgerService<C> {
    repository: Arc<C>,
    ids: Arc<dyn IdAllocator>,
    clock: Arc<dyn Clock>,
    write_lock: Arc<Mutex<()>>,
}

impl<C> Clone for LedgerService<C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<C: ClickRepository> LedgerService<C> {
    pub fn new(repository: C, ids: Arc<dyn IdAllocator>) -> Self {
        Self {
            repository: Arc::new(repository),
            ids,
            clock: Arc::new(SystemClock),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn repository(&self) -> &C {
        &self.repository
    }
}

#[async_trait]
impl<C: ClickRepository> ClickLedger for LedgerService<C> {
    async fn append(&self, code: &ShortCode, metadata: ClickMetadata) -> Result<ClickRecord> {
        let _guard = self.write_lock.lock().await;

        let click = ClickRecord {
            id: self.ids.next_id()?,
            token: code.clone(),
            timestamp: self.clock.now(),
            metadata,
        };
        self.repository.insert(click.clone()).await?;

        trace!(code = %code, id = click.id, "recorded click");
        Ok(click)
    }

    async fn list_for(&self, code: &ShortCode) -> Result<Vec<ClickRecord>> {
        Ok(self.repository.list_for(code).await?)
    }

    async fn list_all(&self) -> Result<Vec<ClickRecord>> {
        Ok(self.repository.list().await?)
    }

    async fn delete_for(&self, code: &ShortCode) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let removed = self.repository.delete_for(code).await?;
        debug!(code = %code, removed, "deleted clicks");
        Ok(removed)
    }

    async fn clear(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let removed = self.repository.clear().await?;
        debug!(removed, "cleared click ledger");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use snip_core::{Location, ManualClock};
    use snip_sequence::Sequence;
    use snip_storage::InMemoryClickRepository;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn ledger() -> (LedgerService<InMemoryClickRepository>, ManualClock) {
        let clock = ManualClock::new(Timestamp::from_second(1_700_000_000).unwrap());
        let ledger = LedgerService::new(
            InMemoryClickRepository::new(),
            Arc::new(Sequence::in_memory()),
        )
        .with_clock(Arc::new(clock.clone()));
        (ledger, clock)
    }

    #[tokio::test]
    async fn append_stamps_id_and_time() {
        let (ledger, clock) = ledger();
        let metadata = ClickMetadata {
            referrer: Some("twitter.com".to_string()),
            location: Some(Location {
                city: Some("Tokyo".to_string()),
                country: Some("Japan".to_string()),
            }),
            user_agent: Some("curl/8.0".to_string()),
        };

        let click = ledger.append(&code("abc123"), metadata.clone()).await.unwrap();
        assert_eq!(click.id, 1);
        assert_eq!(click.token, code("abc123"));
        assert_eq!(click.timestamp, clock.now());
        assert_eq!(click.metadata, metadata);
    }

    #[tokio::test]
    async fn append_does_not_require_a_live_url() {
        let (ledger, _) = ledger();
        assert!(ledger
            .append(&code("ghost"), ClickMetadata::default())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn list_for_is_chronological() {
        let (ledger, clock) = ledger();

        for _ in 0..3 {
            ledger.append(&code("abc"), ClickMetadata::default()).await.unwrap();
            ledger.append(&code("xyz"), ClickMetadata::default()).await.unwrap();
            clock.advance(SignedDuration::from_secs(1));
        }

        let clicks = ledger.list_for(&code("abc")).await.unwrap();
        assert_eq!(clicks.len(), 3);
        assert!(clicks.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(clicks.iter().all(|c| c.token == code("abc")));
        assert_eq!(ledger.list_all().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn delete_for_and_clear() {
        let (ledger, _) = ledger();
        ledger.append(&code("abc"), ClickMetadata::default()).await.unwrap();
        ledger.append(&code("abc"), ClickMetadata::default()).await.unwrap();
        ledger.append(&code("xyz"), ClickMetadata::default()).await.unwrap();

        assert_eq!(ledger.delete_for(&code("abc")).await.unwrap(), 2);
        assert!(ledger.list_for(&code("abc")).await.unwrap().is_empty());
        assert_eq!(ledger.list_all().await.unwrap().len(), 1);

        assert_eq!(ledger.clear().await.unwrap(), 1);
        assert!(ledger.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_keep_increasing_after_clear() {
        let (ledger, _) = ledger();
        let first = ledger.append(&code("abc"), ClickMetadata::default()).await.unwrap();
        ledger.clear().await.unwrap();
        let second = ledger.append(&code("abc"), ClickMetadata::default()).await.unwrap();
        assert!(second.id > first.id);
    }
}
