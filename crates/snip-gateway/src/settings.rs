use snip_core::{Clock, SystemClock};
use snip_generator::random::DEFAULT_LENGTH;
use snip_shortener::ShortenerSettings;
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// Configures a [`Gateway`](crate::Gateway).
#[derive(Clone, TypedBuilder)]
pub struct GatewaySettings {
    /// Time source for record creation, expiry checks and click timestamps.
    #[builder(default = Arc::new(SystemClock) as Arc<dyn Clock>)]
    pub clock: Arc<dyn Clock>,
    #[builder(default)]
    pub shortener: ShortenerSettings,
    /// Length of generated codes.
    #[builder(default = DEFAULT_LENGTH)]
    pub code_length: usize,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
