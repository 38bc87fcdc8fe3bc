use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use snip_core::error::{Result, StorageError};
use snip_core::{ClickRecord, ClickRepository, ShortCode};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    records: DashMap<u64, ClickRecord>,
    by_code: DashMap<ShortCode, Vec<u64>>,
}

/// In-memory click storage keyed by click id with a per-code index.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClickRepository {
    inner: Arc<Inner>,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the store from persisted clicks. Duplicate ids are rejected.
    pub fn from_records(clicks: impl IntoIterator<Item = ClickRecord>) -> Result<Self> {
        let repo = Self::new();
        for click in clicks {
            repo.put(click)?;
        }
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    fn put(&self, click: ClickRecord) -> Result<()> {
        let id = click.id;
        let code = click.token.clone();

        match self.inner.records.entry(id) {
            Entry::Occupied(_) => {
                return Err(StorageError::InvalidData(format!(
                    "click id {id} is already in use"
                )))
            }
            Entry::Vacant(slot) => {
                slot.insert(click);
            }
        }

        self.inner.by_code.entry(code).or_default().push(id);
        Ok(())
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn insert(&self, click: ClickRecord) -> Result<()> {
        self.put(click)
    }

    async fn list_for(&self, code: &ShortCode) -> Result<Vec<ClickRecord>> {
        let ids = match self.inner.by_code.get(code) {
            Some(ids) => ids.value().clone(),
            None => return Ok(Vec::new()),
        };

        let mut clicks: Vec<ClickRecord> = ids
            .iter()
            .filter_map(|id| self.inner.records.get(id).map(|c| c.value().clone()))
            .collect();
        clicks.sort_by_key(|c| (c.timestamp, c.id));
        Ok(clicks)
    }

    async fn list(&self) -> Result<Vec<ClickRecord>> {
        Ok(self
            .inner
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn delete_for(&self, code: &ShortCode) -> Result<usize> {
        let Some((_, ids)) = self.inner.by_code.remove(code) else {
            return Ok(0);
        };

        Ok(ids
            .iter()
            .filter(|id| self.inner.records.remove(*id).is_some())
            .count())
    }

    async fn clear(&self) -> Result<usize> {
        let removed = self.inner.records.len();
        self.inner.by_code.clear();
        self.inner.records.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use snip_core::ClickMetadata;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn click(id: u64, token: &str, second: i64) -> ClickRecord {
        ClickRecord {
            id,
            token: code(token),
            timestamp: Timestamp::from_second(second).unwrap(),
            metadata: ClickMetadata {
                referrer: Some("direct".to_string()),
                ..ClickMetadata::default()
            },
        }
    }

    #[tokio::test]
    async fn list_for_is_ordered_by_time() {
        let repo = InMemoryClickRepository::new();
        repo.insert(click(3, "abc", 30)).await.unwrap();
        repo.insert(click(1, "abc", 10)).await.unwrap();
        repo.insert(click(2, "xyz", 20)).await.unwrap();
        repo.insert(click(4, "abc", 10)).await.unwrap();

        let ids: Vec<u64> = repo
            .list_for(&code("abc"))
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 4, 3]);
    }

    #[tokio::test]
    async fn list_for_unknown_code_is_empty() {
        let repo = InMemoryClickRepository::new();
        assert!(repo.list_for(&code("nope")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let repo = InMemoryClickRepository::new();
        repo.insert(click(1, "abc", 10)).await.unwrap();

        let err = repo.insert(click(1, "xyz", 20)).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
        assert!(repo.list_for(&code("xyz")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_for_removes_only_that_code() {
        let repo = InMemoryClickRepository::new();
        repo.insert(click(1, "abc", 10)).await.unwrap();
        repo.insert(click(2, "abc", 20)).await.unwrap();
        repo.insert(click(3, "xyz", 30)).await.unwrap();

        assert_eq!(repo.delete_for(&code("abc")).await.unwrap(), 2);
        assert!(repo.list_for(&code("abc")).await.unwrap().is_empty());
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert_eq!(repo.delete_for(&code("abc")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let repo = InMemoryClickRepository::new();
        repo.insert(click(1, "abc", 10)).await.unwrap();
        repo.insert(click(2, "xyz", 20)).await.unwrap();

        assert_eq!(repo.clear().await.unwrap(), 2);
        assert!(repo.is_empty());
        assert!(repo.list_for(&code("abc")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn from_records_rebuilds_index() {
        let base = Timestamp::from_second(100).unwrap();
        let mut later = click(2, "abc", 0);
        later.timestamp = base + SignedDuration::from_secs(5);
        let mut earlier = click(1, "abc", 0);
        earlier.timestamp = base;

        let repo = InMemoryClickRepository::from_records(vec![later, earlier]).unwrap();
        let ids: Vec<u64> = repo
            .list_for(&code("abc"))
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
