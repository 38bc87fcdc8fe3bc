use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use snip_core::error::{Result, StorageError};
use snip_core::{ReadRepository, Repository, ShortCode, UrlRecord};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    records: DashMap<ShortCode, UrlRecord>,
    ids: DashMap<u64, ShortCode>,
    /// Every code ever inserted. Never shrinks.
    issued: DashSet<ShortCode>,
}

/// In-memory url storage, indexed by code and by id.
///
/// Besides the live records it keeps every code ever inserted, which is what
/// makes a deleted code impossible to insert again. Clones share the same
/// storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Inner>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a repository from persisted parts.
    ///
    /// The codes of `records` are added to `issued` if missing. Duplicate
    /// codes or ids are rejected as invalid data.
    pub fn from_parts(
        records: impl IntoIterator<Item = UrlRecord>,
        issued: impl IntoIterator<Item = ShortCode>,
    ) -> Result<Self> {
        let repo = Self::new();
        for code in issued {
            repo.inner.issued.insert(code);
        }

        for record in records {
            if repo.inner.ids.contains_key(&record.id) {
                return Err(StorageError::InvalidData(format!(
                    "duplicate url id {}",
                    record.id
                )));
            }
            if repo.inner.records.contains_key(&record.token) {
                return Err(StorageError::InvalidData(format!(
                    "duplicate short code {}",
                    record.token
                )));
            }
            repo.inner.issued.insert(record.token.clone());
            repo.inner.ids.insert(record.id, record.token.clone());
            repo.inner.records.insert(record.token.clone(), record);
        }

        Ok(repo)
    }

    /// Every code ever inserted, live or deleted, in sorted order.
    pub fn issued(&self) -> Vec<ShortCode> {
        let mut codes: Vec<_> = self.inner.issued.iter().map(|c| c.key().clone()).collect();
        codes.sort();
        codes
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.inner.records.get(code).map(|entry| entry.value().clone()))
    }

    async fn get_by_id(&self, id: u64) -> Result<Option<UrlRecord>> {
        let Some(code) = self.inner.ids.get(&id).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        self.get(&code).await
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.inner.issued.contains(code))
    }

    async fn list(&self) -> Result<Vec<UrlRecord>> {
        Ok(self
            .inner
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: UrlRecord) -> Result<()> {
        if self.inner.ids.contains_key(&record.id) {
            return Err(StorageError::InvalidData(format!(
                "url id {} is already in use",
                record.id
            )));
        }

        // DashSet::insert is the atomic check-and-claim for the code.
        if !self.inner.issued.insert(record.token.clone()) {
            return Err(StorageError::Conflict(record.token.to_string()));
        }

        self.inner.ids.insert(record.id, record.token.clone());
        self.inner.records.insert(record.token.clone(), record);
        Ok(())
    }

    async fn delete(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let Some((_, record)) = self.inner.records.remove(code) else {
            return Ok(None);
        };
        self.inner.ids.remove(&record.id);
        Ok(Some(record))
    }
}
