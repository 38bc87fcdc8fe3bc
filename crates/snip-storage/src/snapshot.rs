use crate::clicks::InMemoryClickRepository;
use crate::memory::InMemoryRepository;
use serde::{Deserialize, Serialize};
use snip_core::error::{Result, StorageError};
use snip_core::{ClickRecord, ClickRepository, ReadRepository, ShortCode, UrlRecord};
use snip_core::fs::write_atomic;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A point-in-time copy of the url and click stores.
///
/// The id counter is not part of the snapshot; it is persisted by its own
/// counter store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Live url records, ordered by id.
    pub urls: Vec<UrlRecord>,
    /// Every code ever issued, live or deleted.
    pub issued: Vec<ShortCode>,
    /// Clicks ordered by id.
    pub clicks: Vec<ClickRecord>,
}

impl Snapshot {
    /// Copies the current contents of both stores.
    ///
    /// The copy is taken store by store; callers that need it to be
    /// consistent across both must hold off writers while capturing.
    pub async fn capture(
        urls: &InMemoryRepository,
        clicks: &InMemoryClickRepository,
    ) -> Result<Self> {
        let mut url_records = urls.list().await?;
        url_records.sort_by_key(|r| r.id);

        let mut click_records = clicks.list().await?;
        click_records.sort_by_key(|c| c.id);

        Ok(Self {
            urls: url_records,
            issued: urls.issued(),
            clicks: click_records,
        })
    }

    /// Builds fresh stores holding the snapshot's contents.
    pub fn restore(self) -> Result<(InMemoryRepository, InMemoryClickRepository)> {
        let urls = InMemoryRepository::from_parts(self.urls, self.issued)?;
        let clicks = InMemoryClickRepository::from_records(self.clicks)?;
        Ok((urls, clicks))
    }

    /// Reads a snapshot from `path`. Returns `None` if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Unavailable(format!(
                    "read {}: {e}",
                    path.display()
                )))
            }
        };

        let snapshot = serde_json::from_slice(&raw).map_err(|e| {
            StorageError::InvalidData(format!("parse {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "loaded snapshot");
        Ok(Some(snapshot))
    }

    /// Writes the snapshot to `path`, replacing any previous file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let body = serde_json::to_vec_pretty(self)
            .map_err(|e| StorageError::InvalidData(format!("encode snapshot: {e}")))?;
        write_atomic(path, &body)
            .map_err(|e| StorageError::Unavailable(format!("write {}: {e}", path.display())))?;

        debug!(
            path = %path.display(),
            urls = self.urls.len(),
            clicks = self.clicks.len(),
            "saved snapshot"
        );
        Ok(())
    }
}
