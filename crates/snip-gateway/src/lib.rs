//! The Snip facade.
//!
//! [`Gateway`] wires the registry, the click ledger, the redirector and the
//! stats aggregator over shared in-memory stores, and serializes mutations
//! across them. [`DataDir`] loads and saves a gateway's state on disk.

pub mod data_dir;
pub mod gateway;
mod sample;
pub mod settings;

pub use data_dir::{DataDir, DataDirError};
pub use gateway::{ClearSummary, Gateway, RedirectTarget, ShortenReceipt};
pub use settings::GatewaySettings;

pub type GatewayError = snip_core::ShortenerError;
pub type Result<T> = std::result::Result<T, GatewayError>;
