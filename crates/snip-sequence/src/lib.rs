//! Identity allocation for Snip records.
//!
//! A [`Sequence`] hands out strictly increasing ids on top of a persisted
//! [`CounterStore`]. The advanced counter is always stored before the id is
//! returned.

mod counter;
pub mod error;
mod sequence;

pub use counter::{CounterStore, FileCounter, MemoryCounter};
pub use error::Error;
pub use sequence::Sequence;
