//! Storage backends for Snip.
//!
//! The in-memory repositories index urls by code and by id, and clicks by id
//! and by code. [`Snapshot`] persists both to a JSON file.

pub mod clicks;
pub mod memory;
pub mod snapshot;

pub use clicks::InMemoryClickRepository;
pub use memory::InMemoryRepository;
pub use snapshot::Snapshot;
