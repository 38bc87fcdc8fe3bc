use crate::counter::{CounterStore, MemoryCounter};
use crate::error::Error;
use snip_core::{IdAllocator, StorageError};
use std::sync::Mutex;
use tracing::trace;

/// Monotonic id allocator over a [`CounterStore`].
///
/// The counter holds the last id handed out, so a fresh store issues `1`
/// first.
pub struct Sequence<S: CounterStore> {
    store: S,
    last: Mutex<u64>,
}

impl Sequence<MemoryCounter> {
    /// A sequence that is not persisted beyond the process.
    pub fn in_memory() -> Self {
        Self {
            store: MemoryCounter::new(),
            last: Mutex::new(0),
        }
    }
}

impl<S: CounterStore> Sequence<S> {
    /// Creates a sequence resuming from the value persisted in `store`.
    pub fn new(store: S) -> Result<Self, Error> {
        let last = store.load()?;
        Ok(Self {
            store,
            last: Mutex::new(last),
        })
    }

    /// Returns the last id handed out, or 0 if none was.
    pub fn current(&self) -> Result<u64, Error> {
        self.last
            .lock()
            .map(|last| *last)
            .map_err(|_| Error::StatePoisoned)
    }

    /// Allocates the next id.
    ///
    /// The advanced value is written to the store before it is returned. If
    /// the write fails nothing is handed out and the in-memory state does not
    /// move, so the same value is attempted again on the next call.
    pub fn allocate(&self) -> Result<u64, Error> {
        let mut last = self.last.lock().map_err(|_| Error::StatePoisoned)?;
        let next = last.checked_add(1).ok_or(Error::Overflow)?;

        self.store.store(next)?;
        *last = next;

        trace!(id = next, "allocated id");
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: CounterStore> IdAllocator for Sequence<S> {
    fn next_id(&self) -> Result<u64, StorageError> {
        self.allocate().map_err(StorageError::from)
    }
}
