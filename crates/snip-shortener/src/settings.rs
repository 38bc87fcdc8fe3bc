use jiff::SignedDuration;
use typed_builder::TypedBuilder;

/// Expiry window used when a request carries no usable TTL.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_hours(24 * 30);

/// How many generated codes are tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 16;

/// Configures a [`ShortenerService`](crate::ShortenerService).
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// Expiry window for records created without a positive TTL.
    #[builder(default = DEFAULT_TTL)]
    pub default_ttl: SignedDuration,
    /// Upper bound on generate-and-check rounds for one creation.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
