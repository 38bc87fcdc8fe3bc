use crate::settings::ShortenerSettings;
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use snip_core::{
    Clock, IdAllocator, Repository, ShortCode, ShortenParams, Shortener, ShortenerError,
    SystemClock, UrlRecord,
};
use snip_generator::Generator;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

type Result<T> = std::result::Result<T, ShortenerError>;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - Short code minting (custom aliases or generated codes with retry)
/// - Expiry computation and enforcement
/// - Id allocation
///
/// Writes are serialized by an internal lock so the "is this code free"
/// check and the insert that follows never interleave with another write.
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    ids: Arc<dyn IdAllocator>,
    clock: Arc<dyn Clock>,
    settings: ShortenerSettings,
    write_lock: Arc<Mutex<()>>,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
            settings: self.settings,
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` on the system clock with default
    /// settings.
    pub fn new(repository: R, generator: G, ids: Arc<dyn IdAllocator>) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            ids,
            clock: Arc::new(SystemClock),
            settings: ShortenerSettings::default(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_settings(mut self, settings: ShortenerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Rejects empty (or whitespace-only) URLs. Scheme checks are left to
    /// callers.
    fn validate_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Computes when a record created at `created_at` expires.
    ///
    /// A positive `ttl_minutes` wins; anything else falls back to the
    /// configured default window.
    fn expiry_for(&self, created_at: Timestamp, ttl_minutes: Option<i64>) -> Result<Timestamp> {
        let window = match ttl_minutes {
            Some(minutes) if minutes > 0 => minutes
                .checked_mul(60)
                .map(SignedDuration::from_secs)
                .ok_or_else(|| {
                    ShortenerError::InvalidTtl(format!("{minutes} minutes is out of range"))
                })?,
            _ => self.settings.default_ttl,
        };

        if window <= SignedDuration::ZERO {
            return Err(ShortenerError::InvalidTtl(format!(
                "expiry window must be positive, got {window}"
            )));
        }

        created_at.checked_add(window).map_err(|e| {
            ShortenerError::InvalidTtl(format!("expiry is out of range: {e}"))
        })
    }

    /// Picks the code for a new record.
    ///
    /// A custom alias is used as-is unless it was ever issued. Otherwise the
    /// generator is drawn from until it yields a code that was never issued,
    /// giving up after `max_attempts` draws.
    async fn mint_code(&self, custom_alias: Option<ShortCode>) -> Result<ShortCode> {
        if let Some(code) = custom_alias {
            if self.repository.exists(&code).await? {
                debug!(code = %code, "custom alias already issued");
                return Err(ShortenerError::AliasConflict(code.to_string()));
            }
            return Ok(code);
        }

        let attempts = self.settings.max_attempts;
        for attempt in 1..=attempts {
            let code = self.generator.generate();
            if !self.repository.exists(&code).await? {
                trace!(code = %code, attempt, "generated short code");
                return Ok(code);
            }
            debug!(code = %code, attempt, "generated short code already issued");
        }

        warn!(attempts, "short code generator exhausted");
        Err(ShortenerError::Exhausted { attempts })
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<UrlRecord> {
        Self::validate_url(&params.target_url)?;

        let _guard = self.write_lock.lock().await;

        let token = self.mint_code(params.custom_alias).await?;
        let created_at = self.clock.now();
        let expires_at = self.expiry_for(created_at, params.ttl_minutes)?;
        let id = self.ids.next_id()?;

        let record = UrlRecord {
            id,
            token,
            target_url: params.target_url,
            created_at,
            expires_at,
        };

        self.repository.insert(record.clone()).await?;

        debug!(
            id = record.id,
            code = %record.token,
            expires_at = %record.expires_at,
            "shortened url"
        );
        Ok(record)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<UrlRecord> {
        trace!(code = %code, "resolving short code");

        let Some(record) = self.repository.get(code).await? else {
            trace!(code = %code, "short code not found");
            return Err(ShortenerError::NotFound(code.to_string()));
        };

        if record.is_expired_at(self.clock.now()) {
            debug!(code = %code, expires_at = %record.expires_at, "record has expired");
            return Err(ShortenerError::Expired {
                token: code.to_string(),
                expired_at: record.expires_at,
            });
        }

        debug!(code = %code, url = %record.target_url, "resolved short code");
        Ok(record)
    }

    async fn get(&self, code: &ShortCode) -> Result<UrlRecord> {
        self.repository
            .get(code)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(code.to_string()))
    }

    async fn list(&self) -> Result<Vec<UrlRecord>> {
        Ok(self.repository.list().await?)
    }

    async fn delete(&self, code: &ShortCode) -> Result<UrlRecord> {
        let _guard = self.write_lock.lock().await;

        let record = self
            .repository
            .delete(code)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(code.to_string()))?;

        debug!(code = %code, id = record.id, "deleted url");
        Ok(record)
    }
}
