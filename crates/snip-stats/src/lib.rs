//! Per-link click statistics and the cascading link removal.
//!
//! Stats are computed on every call by joining registry records with the
//! click ledger; no aggregate is stored.

pub mod service;

pub use service::StatsService;

pub type StatsError = snip_core::ShortenerError;
pub type Result<T> = std::result::Result<T, StatsError>;
