use crate::error::Error;
use snip_core::fs::write_atomic;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// A persisted scalar holding the last id handed out.
pub trait CounterStore: Send + Sync + 'static {
    /// Reads the persisted value. A store that was never written reads as 0.
    fn load(&self) -> Result<u64, Error>;
    /// Durably replaces the persisted value.
    fn store(&self, value: u64) -> Result<(), Error>;
}

/// A counter that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCounter {
    value: AtomicU64,
}

impl MemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a known value, e.g. one restored from elsewhere.
    pub fn with_value(value: u64) -> Self {
        Self {
            value: AtomicU64::new(value),
        }
    }
}

impl CounterStore for MemoryCounter {
    fn load(&self) -> Result<u64, Error> {
        Ok(self.value.load(Ordering::SeqCst))
    }

    fn store(&self, value: u64) -> Result<(), Error> {
        self.value.store(value, Ordering::SeqCst);
        Ok(())
    }
}

/// A counter persisted as decimal text in a single file.
///
/// Writes replace the file atomically, so a reader never observes a
/// half-written value.
#[derive(Debug, Clone)]
pub struct FileCounter {
    path: PathBuf,
}

impl FileCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CounterStore for FileCounter {
    fn load(&self) -> Result<u64, Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        raw.trim()
            .parse::<u64>()
            .map_err(|e| Error::Corrupt(format!("{}: {e}", self.path.display())))
    }

    fn store(&self, value: u64) -> Result<(), Error> {
        write_atomic(&self.path, value.to_string().as_bytes())?;
        Ok(())
    }
}
