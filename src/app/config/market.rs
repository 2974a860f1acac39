//! Market policy configuration (`[market]`).

use serde::Deserialize;

use crate::domain::{BundleAnchor, MarketPolicy};

/// Thresholds, capital and ranking size.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Catalogue is stale after this many seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Tax on the instant-sell leg, in percent.
    #[serde(default = "default_tax_rate_pct")]
    pub tax_rate_pct: f64,
    /// Levels within this percentage of the anchor are bundled.
    #[serde(default = "default_same_order_threshold_pct")]
    pub same_order_threshold_pct: f64,
    #[serde(default = "default_manipulated_price_threshold_pct")]
    pub manipulated_price_threshold_pct: f64,
    #[serde(default = "default_manipulated_order_threshold_pct")]
    pub manipulated_order_threshold_pct: f64,
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: f64,
    /// Number of flips kept per scan.
    #[serde(default = "default_max_flips_shown")]
    pub max_flips_shown: usize,
    /// Coins available to invest.
    #[serde(default = "default_capital")]
    pub capital: f64,
    #[serde(default)]
    pub bundle_anchor: BundleAnchor,
    /// Evict products missing from snapshots for longer than this.
    /// Unset keeps the last known data forever.
    #[serde(default)]
    pub max_staleness_secs: Option<u64>,
}

const fn default_ttl_secs() -> u64 {
    15
}

const fn default_tax_rate_pct() -> f64 {
    1.0
}

const fn default_same_order_threshold_pct() -> f64 {
    1.0
}

const fn default_manipulated_price_threshold_pct() -> f64 {
    50.0
}

const fn default_manipulated_order_threshold_pct() -> f64 {
    200.0
}

const fn default_hours_per_week() -> f64 {
    168.0
}

const fn default_max_flips_shown() -> usize {
    10
}

const fn default_capital() -> f64 {
    1_000_000_000.0
}

impl MarketConfig {
    /// Policy handed to the refiner and product queries.
    #[must_use]
    pub fn policy(&self) -> MarketPolicy {
        MarketPolicy {
            tax_rate_pct: self.tax_rate_pct,
            same_order_threshold_pct: self.same_order_threshold_pct,
            manipulated_price_threshold_pct: self.manipulated_price_threshold_pct,
            manipulated_order_threshold_pct: self.manipulated_order_threshold_pct,
            hours_per_week: self.hours_per_week,
            bundle_anchor: self.bundle_anchor,
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            tax_rate_pct: default_tax_rate_pct(),
            same_order_threshold_pct: default_same_order_threshold_pct(),
            manipulated_price_threshold_pct: default_manipulated_price_threshold_pct(),
            manipulated_order_threshold_pct: default_manipulated_order_threshold_pct(),
            hours_per_week: default_hours_per_week(),
            max_flips_shown: default_max_flips_shown(),
            capital: default_capital(),
            bundle_anchor: BundleAnchor::default(),
            max_staleness_secs: None,
        }
    }
}
