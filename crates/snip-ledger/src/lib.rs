//! The click ledger: an append-only record of resolutions.

pub mod service;

pub use service::LedgerService;
