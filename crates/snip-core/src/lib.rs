//! Core types and traits for the Snip link shortener.
//!
//! This crate provides the records, error taxonomy and the seams shared by
//! the registry, the click ledger, the stats aggregator and the facade.

pub mod clock;
pub mod error;
pub mod fs;
pub mod id;
pub mod ledger;
pub mod record;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ErrorKind, ShortenerError, StorageError};
pub use id::IdAllocator;
pub use ledger::ClickLedger;
pub use record::{ClickMetadata, ClickRecord, LinkStatus, Location, UrlRecord, UrlStats};
pub use repository::{ClickRepository, ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::{ShortenParams, Shortener};
