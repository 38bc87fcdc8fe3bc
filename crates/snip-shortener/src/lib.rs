//! URL registry implementation.
//!
//! This crate provides [`ShortenerService`], the [`Shortener`] implementation
//! that mints short codes, computes expiry and enforces it on resolution.
//! Core types are re-exported from `snip_core`.
//!
//! [`Shortener`]: snip_core::Shortener

pub mod service;
pub mod settings;

pub use service::ShortenerService;
pub use settings::ShortenerSettings;
