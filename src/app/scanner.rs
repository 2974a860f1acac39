//! Scan orchestration: refresh-if-stale, rank, report.
//!
//! A scan is strictly sequential. The scanner owns the catalogue for the
//! whole cycle, so nothing else can mutate it mid-scan, and the run loop
//! only starts the next cycle after the previous one (and the minimum
//! interval) has finished.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::app::catalogue::{Catalogue, RefreshOutcome};
use crate::app::Config;
use crate::domain::{Flip, MarketPolicy, TopFlips};
use crate::error::Result;
use crate::port::CatalogueSource;

/// Result of one scan cycle.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub scanned_at: DateTime<Utc>,
    pub outcome: RefreshOutcome,
    /// Number of products that passed the tradeability gate.
    pub tradeable: usize,
    /// Best flips, most profitable first.
    pub flips: Vec<Flip>,
    /// Configured size of the ranking.
    pub max_flips: usize,
}

impl ScanReport {
    /// Fails with the source error when this cycle's refresh failed.
    pub fn ensure_refreshed(&self) -> Result<()> {
        match &self.outcome {
            RefreshOutcome::Failed(err) => Err(err.clone().into()),
            _ => Ok(()),
        }
    }
}

/// Ties the catalogue, profit model and top-K selector together.
pub struct Scanner {
    source: Box<dyn CatalogueSource>,
    catalogue: Catalogue,
    policy: MarketPolicy,
    capital: f64,
    max_flips: usize,
    min_interval: Duration,
}

impl Scanner {
    #[must_use]
    pub fn new(config: &Config, source: Box<dyn CatalogueSource>) -> Self {
        Self {
            source,
            catalogue: Catalogue::from_config(config),
            policy: config.market.policy(),
            capital: config.market.capital,
            max_flips: config.market.max_flips_shown,
            min_interval: Duration::from_millis(config.scan.min_interval_ms),
        }
    }

    #[must_use]
    pub const fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub async fn scan_once(&mut self) -> ScanReport {
        self.scan_at(Utc::now()).await
    }

    /// Run one cycle as of `now`.
    pub async fn scan_at(&mut self, now: DateTime<Utc>) -> ScanReport {
        let outcome = self.catalogue.refresh_at(self.source.as_ref(), now).await;
        let (flips, tradeable) = self.rank();

        if outcome.attempted() {
            info!(
                products = self.catalogue.len(),
                tradeable,
                flips = flips.len(),
                "Scan complete"
            );
        }

        ScanReport {
            scanned_at: now,
            outcome,
            tradeable,
            flips,
            max_flips: self.max_flips,
        }
    }

    /// Rank every tradeable product in the catalogue.
    #[must_use]
    pub fn rank(&self) -> (Vec<Flip>, usize) {
        let mut top = TopFlips::new(self.max_flips);
        let mut tradeable = 0;

        for product in self.catalogue.products() {
            if !product.is_tradeable() {
                continue;
            }
            tradeable += 1;

            let Some(profit) = product.profit_per_hour(self.capital, &self.policy) else {
                continue;
            };
            top.offer(Flip::new(
                product.id().clone(),
                profit,
                product.book_imbalance(),
            ));
        }

        (top.into_ranked(), tradeable)
    }

    /// Scan forever, handing each cycle that touched the source to
    /// `on_report`. Cycles are at least `min_interval` apart.
    pub async fn run<F>(&mut self, mut on_report: F)
    where
        F: FnMut(&ScanReport),
    {
        info!(
            source = self.source.source_name(),
            capital = self.capital,
            max_flips = self.max_flips,
            "Scanner started"
        );

        loop {
            let report = self.scan_once().await;
            if report.outcome.attempted() {
                on_report(&report);
            } else {
                debug!("Catalogue fresh, nothing to report this cycle");
            }
            tokio::time::sleep(self.min_interval).await;
        }
    }
}
