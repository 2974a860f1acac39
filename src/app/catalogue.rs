//! Catalogue cache: one refined [`Product`] per product id.
//!
//! The whole catalogue shares a single refresh timestamp. A refresh pulls a
//! full snapshot from the [`CatalogueSource`] only once that timestamp is
//! older than the TTL, and merges it into the existing entries so products
//! keep their identity (and allocations) across cycles.
//!
//! Source failures stop here: they are logged and reported as
//! [`RefreshOutcome::Failed`], and the catalogue keeps its last known state.
//! The refresh timestamp is recorded before the fetch, so a failing source
//! is only retried once the TTL has elapsed again.
//!
//! Products missing from a snapshot are kept as-is unless a maximum
//! staleness is configured, in which case they are evicted once they have
//! been absent for longer than that.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use crate::app::Config;
use crate::domain::{Ladder, Product, ProductId, Refiner};
use crate::error::SourceError;
use crate::port::{CatalogueSnapshot, CatalogueSource};

/// What a call to [`Catalogue::refresh`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Data was still within the TTL; nothing was fetched.
    Fresh,
    /// A snapshot was merged.
    Refreshed {
        inserted: usize,
        updated: usize,
        evicted: usize,
    },
    /// The source answered with no products; nothing changed.
    Empty,
    /// The fetch failed; nothing changed.
    Failed(SourceError),
}

impl RefreshOutcome {
    /// True if a fetch was attempted this cycle.
    #[must_use]
    pub const fn attempted(&self) -> bool {
        !matches!(self, Self::Fresh)
    }
}

#[derive(Debug)]
struct Entry {
    product: Product,
    last_seen: DateTime<Utc>,
}

/// Owned map of products plus the shared refresh timestamp.
#[derive(Debug)]
pub struct Catalogue {
    products: BTreeMap<ProductId, Entry>,
    /// `None` until the first refresh attempt; always stale.
    last_refreshed: Option<DateTime<Utc>>,
    ttl: TimeDelta,
    max_staleness: Option<TimeDelta>,
    fetch_timeout: Duration,
    refiner: Refiner,
}

impl Catalogue {
    /// Create an empty catalogue that refreshes after `ttl`.
    #[must_use]
    pub fn new(refiner: Refiner, ttl: Duration) -> Self {
        Self {
            products: BTreeMap::new(),
            last_refreshed: None,
            ttl: to_delta(ttl),
            max_staleness: None,
            fetch_timeout: Duration::from_secs(10),
            refiner,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let catalogue = Self::new(
            Refiner::new(&config.market.policy()),
            Duration::from_secs(config.market.ttl_secs),
        )
        .with_fetch_timeout(Duration::from_millis(config.source.timeout_ms));

        match config.market.max_staleness_secs {
            Some(secs) => catalogue.with_max_staleness(Duration::from_secs(secs)),
            None => catalogue,
        }
    }

    /// Evict products absent from snapshots for longer than `max`.
    #[must_use]
    pub fn with_max_staleness(mut self, max: Duration) -> Self {
        self.max_staleness = Some(to_delta(max));
        self
    }

    /// Bound on a single fetch; a slower source counts as a failed refresh.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }

    #[must_use]
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_refreshed {
            None => true,
            Some(at) => now.signed_duration_since(at) > self.ttl,
        }
    }

    pub async fn refresh(&mut self, source: &dyn CatalogueSource) -> RefreshOutcome {
        self.refresh_at(source, Utc::now()).await
    }

    /// Refresh from `source` if stale as of `now`.
    pub async fn refresh_at(
        &mut self,
        source: &dyn CatalogueSource,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        if !self.is_stale_at(now) {
            debug!("Catalogue still fresh, skipping refresh");
            return RefreshOutcome::Fresh;
        }

        info!(source = source.source_name(), "Updating catalogue");
        self.last_refreshed = Some(now);

        let fetched = match tokio::time::timeout(self.fetch_timeout, source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                timeout_ms: u64::try_from(self.fetch_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };

        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(err) => {
                if err.is_transport() {
                    warn!(error = %err, "Catalogue source unavailable, keeping last known data");
                } else {
                    warn!(error = %err, "Catalogue source returned bad data, keeping last known data");
                }
                return RefreshOutcome::Failed(err);
            }
        };

        if snapshot.is_empty() {
            warn!("Catalogue source returned no products");
            return RefreshOutcome::Empty;
        }

        let (inserted, updated) = self.merge(snapshot, now);
        let evicted = self.evict(now);

        info!(
            inserted,
            updated,
            evicted,
            total = self.products.len(),
            "Catalogue refreshed"
        );

        RefreshOutcome::Refreshed {
            inserted,
            updated,
            evicted,
        }
    }

    fn merge(&mut self, snapshot: CatalogueSnapshot, now: DateTime<Utc>) -> (usize, usize) {
        let mut inserted = 0;
        let mut updated = 0;

        for (id, snap) in snapshot {
            if let Some(entry) = self.products.get_mut(&id) {
                entry
                    .product
                    .update(snap.buy_levels, snap.sell_levels, snap.stats);
                entry.product.refine(&self.refiner);
                entry.last_seen = now;
                updated += 1;
            } else {
                let mut product = Product::new(
                    id.clone(),
                    Ladder::new(snap.buy_levels),
                    Ladder::new(snap.sell_levels),
                    snap.stats,
                );
                product.refine(&self.refiner);
                self.products.insert(
                    id,
                    Entry {
                        product,
                        last_seen: now,
                    },
                );
                inserted += 1;
            }
        }

        (inserted, updated)
    }

    fn evict(&mut self, now: DateTime<Utc>) -> usize {
        let Some(max) = self.max_staleness else {
            return 0;
        };

        let before = self.products.len();
        self.products.retain(|id, entry| {
            let keep = now.signed_duration_since(entry.last_seen) <= max;
            if !keep {
                debug!(product_id = %id, "Evicting product missing from snapshots");
            }
            keep
        });
        before - self.products.len()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id).map(|entry| &entry.product)
    }

    /// All products in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values().map(|entry| &entry.product)
    }

    /// When the last refresh was attempted.
    #[must_use]
    pub const fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// When `id` last appeared in a snapshot.
    #[must_use]
    pub fn last_seen(&self, id: &ProductId) -> Option<DateTime<Utc>> {
        self.products.get(id).map(|entry| entry.last_seen)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}
