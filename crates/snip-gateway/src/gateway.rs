use crate::sample::{self, SAMPLE_LINKS};
use crate::settings::GatewaySettings;
use crate::{GatewayError, Result};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use snip_core::{
    ClickLedger, ClickMetadata, ErrorKind, IdAllocator, ShortCode, ShortenParams, Shortener,
    UrlStats,
};
use snip_generator::RandomGenerator;
use snip_ledger::LedgerService;
use snip_redirector::RedirectorService;
use snip_sequence::Sequence;
use snip_shortener::ShortenerService;
use snip_stats::StatsService;
use snip_storage::{InMemoryClickRepository, InMemoryRepository, Snapshot};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// What a caller gets back from creating a short link.
///
/// The display URL is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenReceipt {
    pub token: ShortCode,
    pub expires_at: Timestamp,
}

/// Where a resolved token points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub target_url: String,
}

/// How much [`Gateway::clear_all`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSummary {
    pub urls: usize,
    pub clicks: usize,
}

/// Entry point for collaborators.
///
/// Mutations hold the gate exclusively, so a create, a resolve-and-log or a
/// cascading removal never interleaves with another. Stats reads share it and
/// see both stores at the same point.
///
/// Clones share the same stores and gate.
#[derive(Clone)]
pub struct Gateway {
    urls: InMemoryRepository,
    clicks: InMemoryClickRepository,
    shortener: Arc<dyn Shortener>,
    ledger: Arc<dyn ClickLedger>,
    redirector: RedirectorService,
    stats: StatsService,
    gate: Arc<RwLock<()>>,
}

impl Gateway {
    /// Wires a gateway over the given stores. Urls and clicks draw ids from
    /// the same allocator.
    pub fn new(
        urls: InMemoryRepository,
        clicks: InMemoryClickRepository,
        ids: Arc<dyn IdAllocator>,
        settings: GatewaySettings,
    ) -> Self {
        let generator = RandomGenerator::builder()
            .length(settings.code_length)
            .build();

        let shortener: Arc<dyn Shortener> = Arc::new(
            ShortenerService::new(urls.clone(), generator, Arc::clone(&ids))
                .with_clock(Arc::clone(&settings.clock))
                .with_settings(settings.shortener),
        );
        let ledger: Arc<dyn ClickLedger> = Arc::new(
            LedgerService::new(clicks.clone(), ids).with_clock(Arc::clone(&settings.clock)),
        );

        Self {
            urls,
            clicks,
            redirector: RedirectorService::new(Arc::clone(&shortener), Arc::clone(&ledger)),
            stats: StatsService::new(Arc::clone(&shortener), Arc::clone(&ledger)),
            shortener,
            ledger,
            gate: Arc::new(RwLock::new(())),
        }
    }

    /// A gateway with empty stores and an unpersisted id sequence.
    pub fn in_memory(settings: GatewaySettings) -> Self {
        Self::new(
            InMemoryRepository::new(),
            InMemoryClickRepository::new(),
            Arc::new(Sequence::in_memory()),
            settings,
        )
    }

    /// Creates a short link.
    ///
    /// An empty `candidate` is treated as absent. A candidate that is not a
    /// valid code fails with a validation error before anything is touched.
    pub async fn shorten(
        &self,
        target_url: impl Into<String>,
        candidate: Option<&str>,
        ttl_minutes: Option<i64>,
    ) -> Result<ShortenReceipt> {
        let mut params = ShortenParams::new(target_url);
        if let Some(candidate) = candidate.filter(|c| !c.is_empty()) {
            params = params.with_alias(ShortCode::new(candidate)?);
        }
        params.ttl_minutes = ttl_minutes;

        let _guard = self.gate.write().await;
        let record = self.shortener.shorten(params).await?;

        info!(code = %record.token, expires_at = %record.expires_at, "created short link");
        Ok(ShortenReceipt {
            token: record.token,
            expires_at: record.expires_at,
        })
    }

    /// Resolves `token` and records the visit.
    pub async fn redirect_target(
        &self,
        token: &str,
        metadata: ClickMetadata,
    ) -> Result<RedirectTarget> {
        let code = lookup_code(token)?;

        let _guard = self.gate.write().await;
        let record = self.redirector.redirect(&code, metadata).await?;

        Ok(RedirectTarget {
            target_url: record.target_url,
        })
    }

    /// Stats for every live link, newest first.
    pub async fn stats_all(&self) -> Result<Vec<UrlStats>> {
        let _guard = self.gate.read().await;
        self.stats.stats_all().await
    }

    pub async fn stats_for(&self, token: &str) -> Result<UrlStats> {
        let code = lookup_code(token)?;

        let _guard = self.gate.read().await;
        self.stats.stats_for(&code).await
    }

    /// Removes a link and its clicks. The token stays issued.
    pub async fn remove_url(&self, token: &str) -> Result<()> {
        let code = lookup_code(token)?;

        let _guard = self.gate.write().await;
        self.stats.remove_url(&code).await?;

        info!(code = %code, "removed short link");
        Ok(())
    }

    /// Deletes every link and every click.
    ///
    /// Issued tokens and the id sequence are kept, so tokens are still never
    /// reused and ids keep increasing afterwards.
    pub async fn clear_all(&self) -> Result<ClearSummary> {
        let _guard = self.gate.write().await;

        let records = self.shortener.list().await?;
        for record in &records {
            self.shortener.delete(&record.token).await?;
        }
        let clicks = self.ledger.clear().await?;

        let summary = ClearSummary {
            urls: records.len(),
            clicks,
        };
        info!(urls = summary.urls, clicks = summary.clicks, "cleared all data");
        Ok(summary)
    }

    /// Creates the sample links and simulates a few visits on each.
    ///
    /// Sample aliases that were already issued are skipped. Returns the
    /// tokens that were created.
    pub async fn seed_sample(&self) -> Result<Vec<ShortCode>> {
        let plans: Vec<Vec<ClickMetadata>> = {
            let mut rng = rand::rng();
            SAMPLE_LINKS
                .iter()
                .map(|_| sample::visits(&mut rng))
                .collect()
        };

        let mut created = Vec::with_capacity(SAMPLE_LINKS.len());
        for (link, visits) in SAMPLE_LINKS.iter().zip(plans) {
            let receipt = match self.shorten(link.target_url, link.alias, None).await {
                Ok(receipt) => receipt,
                Err(e) if e.kind() == ErrorKind::Conflict => {
                    info!(alias = link.alias.unwrap_or_default(), "sample link exists, skipping");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let count = visits.len();
            for metadata in visits {
                self.redirect_target(receipt.token.as_str(), metadata)
                    .await?;
            }
            debug!(code = %receipt.token, visits = count, "seeded sample link");
            created.push(receipt.token);
        }

        info!(created = created.len(), "seeded sample data");
        Ok(created)
    }

    /// Copies both stores at a single point in time.
    pub async fn snapshot(&self) -> snip_core::error::Result<Snapshot> {
        let _guard = self.gate.read().await;
        Snapshot::capture(&self.urls, &self.clicks).await
    }
}

/// Parses a token for lookup. A string that is not a valid code can never
/// have been issued.
fn lookup_code(token: &str) -> Result<ShortCode> {
    ShortCode::new(token).map_err(|_| GatewayError::NotFound(token.to_string()))
}
