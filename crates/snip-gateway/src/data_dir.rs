use crate::gateway::Gateway;
use crate::settings::GatewaySettings;
use fs2::FileExt;
use snip_core::StorageError;
use snip_sequence::{CounterStore, FileCounter, Sequence};
use snip_storage::Snapshot;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub const SNAPSHOT_FILE: &str = "store.json";
pub const COUNTER_FILE: &str = "counter";
pub const LOCK_FILE: &str = "lock";

#[derive(Debug, Error)]
pub enum DataDirError {
    #[error("data directory {0} is in use by another gateway")]
    Locked(PathBuf),
    #[error("lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("id counter: {0}")]
    Counter(#[from] snip_sequence::Error),
}

/// An open directory holding a gateway's persisted state: the store snapshot
/// and the id counter, each in its own file.
///
/// Opening takes an exclusive lock on the directory which is held until the
/// handle is dropped, so a second gateway cannot load the same state and
/// overwrite the first one's writes.
pub struct DataDir {
    root: PathBuf,
    gateway: Gateway,
    _lock: File,
}

impl DataDir {
    /// Locks `root` and builds a gateway from whatever is on disk. A missing
    /// directory is created and opens as an empty gateway.
    ///
    /// If the counter is behind an id already in the snapshot (e.g. the
    /// counter file was lost) it is moved up to that id first.
    pub fn open(root: impl Into<PathBuf>, settings: GatewaySettings) -> Result<Self, DataDirError> {
        let root = root.into();
        let lock = acquire_lock(&root)?;

        let snapshot = Snapshot::load(root.join(SNAPSHOT_FILE))?.unwrap_or_default();

        let counter = FileCounter::new(root.join(COUNTER_FILE));
        let highest = snapshot
            .urls
            .iter()
            .map(|u| u.id)
            .chain(snapshot.clicks.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);
        let persisted = counter.load()?;
        if persisted < highest {
            warn!(persisted, highest, "id counter is behind stored records, advancing");
            counter.store(highest)?;
        }
        let ids = Sequence::new(counter)?;

        debug!(
            root = %root.display(),
            urls = snapshot.urls.len(),
            clicks = snapshot.clicks.len(),
            "opened data dir"
        );

        let (urls, clicks) = snapshot.restore()?;
        Ok(Self {
            root,
            gateway: Gateway::new(urls, clicks, Arc::new(ids), settings),
            _lock: lock,
        })
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE)
    }

    pub fn counter_path(&self) -> PathBuf {
        self.root.join(COUNTER_FILE)
    }

    /// Writes the gateway's stores to the snapshot file. The counter is
    /// persisted on every allocation and needs no save.
    pub async fn save(&self) -> Result<(), DataDirError> {
        let snapshot = self.gateway.snapshot().await?;
        snapshot.save(self.snapshot_path())?;
        Ok(())
    }
}

impl std::fmt::Debug for DataDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataDir")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

fn acquire_lock(root: &Path) -> Result<File, DataDirError> {
    let path = root.join(LOCK_FILE);
    let lock_err = |source| DataDirError::Lock {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(root).map_err(lock_err)?;
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)
        .map_err(lock_err)?;

    match file.try_lock_exclusive() {
        Ok(()) => Ok(file),
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
            Err(DataDirError::Locked(root.to_path_buf()))
        }
        Err(e) => Err(lock_err(e)),
    }
}
