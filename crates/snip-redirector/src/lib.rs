//! Redirect handling: resolve a short code, then record the click.
//!
//! Resolution and click logging are not atomic. A failed resolution never
//! records a click; a click that fails to record after a successful
//! resolution is logged and dropped, and the redirect still succeeds.

pub mod redirector;
pub mod service;

pub use redirector::Redirector;
pub use service::RedirectorService;

/// Errors surfaced by redirect handling.
pub type RedirectorError = snip_core::ShortenerError;

pub type Result<T> = std::result::Result<T, RedirectorError>;
