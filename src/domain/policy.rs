//! Numeric policy shared by the refiner and the product model.

use serde::Deserialize;

/// Which price new levels are compared against while bundling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleAnchor {
    /// Compare every level against the first level of the ladder.
    #[default]
    Fixed,
    /// Re-anchor on the first level of each new bundle.
    Rolling,
}

/// Thresholds, tax and time constants used by refinement and profit math.
///
/// Percentages are expressed as whole percents (`1.0` means 1%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketPolicy {
    /// Tax charged on the instant-sell leg, in percent.
    pub tax_rate_pct: f64,
    /// Levels within this percentage of the anchor are bundled together.
    pub same_order_threshold_pct: f64,
    /// Price jump above which the top level may be manipulated.
    pub manipulated_price_threshold_pct: f64,
    /// Order-count jump above which the top level may be manipulated.
    pub manipulated_order_threshold_pct: f64,
    /// Divisor turning weekly totals into hourly velocity.
    pub hours_per_week: f64,
    pub bundle_anchor: BundleAnchor,
}

impl MarketPolicy {
    /// Fraction of the instant price kept after tax.
    #[must_use]
    pub fn after_tax(&self) -> f64 {
        1.0 - self.tax_rate_pct / 100.0
    }
}

impl Default for MarketPolicy {
    fn default() -> Self {
        Self {
            tax_rate_pct: 1.0,
            same_order_threshold_pct: 1.0,
            manipulated_price_threshold_pct: 50.0,
            manipulated_order_threshold_pct: 200.0,
            hours_per_week: 168.0,
            bundle_anchor: BundleAnchor::Fixed,
        }
    }
}
