//! Top-of-book volume imbalance used as a price-pressure label.

use std::fmt;

use serde::Serialize;

/// Directional label derived from the top-of-book volume imbalance.
///
/// The ratio is `(sell - buy) / (sell + buy)` over the best-level amounts.
/// `HeavySell` (depleted sell side) suggests prices are likely to rise;
/// `HeavyBuy` suggests they are likely to fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BookImbalance {
    HeavySell,
    LightSell,
    Neutral,
    LightBuy,
    HeavyBuy,
}

impl BookImbalance {
    /// Buckets a ratio in `[-1, 1]`. Bounds are left-inclusive; `1.0`
    /// itself falls in `HeavyBuy`. Ratios outside the range (or NaN) have
    /// no label.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Option<Self> {
        if !(-1.0..=1.0).contains(&ratio) {
            return None;
        }
        let label = if ratio < -0.33 {
            Self::HeavySell
        } else if ratio < -0.1 {
            Self::LightSell
        } else if ratio < 0.1 {
            Self::Neutral
        } else if ratio < 0.33 {
            Self::LightBuy
        } else {
            Self::HeavyBuy
        };
        Some(label)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HeavySell => "Heavy sell",
            Self::LightSell => "Light sell",
            Self::Neutral => "Neutral",
            Self::LightBuy => "Light buy",
            Self::HeavyBuy => "Heavy buy",
        }
    }
}

impl fmt::Display for BookImbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
