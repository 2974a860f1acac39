//! Product model: a refined two-sided book plus quick stats.
//!
//! All queries are pure reads over the current refined state. Anything that
//! needs the best level of a ladder returns `None` when that ladder is
//! empty; callers are expected to gate on [`Product::is_tradeable`] first.

use tracing::warn;

use super::book::{Ladder, PriceLevel};
use super::id::ProductId;
use super::imbalance::BookImbalance;
use super::policy::MarketPolicy;
use super::refine::Refiner;
use super::stats::QuickStats;

/// One tradeable product as held by the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    buy_book: Ladder,
    sell_book: Ladder,
    stats: QuickStats,
}

impl Product {
    #[must_use]
    pub fn new(id: ProductId, buy_book: Ladder, sell_book: Ladder, stats: QuickStats) -> Self {
        Self {
            id,
            buy_book,
            sell_book,
            stats,
        }
    }

    /// Overwrites both ladders and the stats in place, keeping allocations.
    ///
    /// The new ladders are raw; call [`Product::refine`] afterwards.
    pub fn update(
        &mut self,
        buy_levels: impl IntoIterator<Item = PriceLevel>,
        sell_levels: impl IntoIterator<Item = PriceLevel>,
        stats: QuickStats,
    ) {
        self.buy_book.replace(buy_levels);
        self.sell_book.replace(sell_levels);
        self.stats = stats;
    }

    /// Runs both refinement passes over each side.
    pub fn refine(&mut self, refiner: &Refiner) {
        refiner.refine(&mut self.buy_book);
        refiner.refine(&mut self.sell_book);
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub const fn buy_book(&self) -> &Ladder {
        &self.buy_book
    }

    #[must_use]
    pub const fn sell_book(&self) -> &Ladder {
        &self.sell_book
    }

    #[must_use]
    pub const fn stats(&self) -> &QuickStats {
        &self.stats
    }

    /// Both sides must have at least one level to be worth pricing.
    #[must_use]
    pub fn is_tradeable(&self) -> bool {
        !self.buy_book.is_empty() && !self.sell_book.is_empty()
    }

    #[must_use]
    pub fn top_buy_price(&self) -> Option<f64> {
        self.buy_book.best().map(PriceLevel::price)
    }

    #[must_use]
    pub fn top_sell_price(&self) -> Option<f64> {
        self.sell_book.best().map(PriceLevel::price)
    }

    #[must_use]
    pub fn top_buy_volume(&self) -> Option<u64> {
        self.buy_book.best().map(PriceLevel::amount)
    }

    #[must_use]
    pub fn top_sell_volume(&self) -> Option<u64> {
        self.sell_book.best().map(PriceLevel::amount)
    }

    #[must_use]
    pub const fn instant_buy_price(&self) -> f64 {
        self.stats.instant_buy_price
    }

    #[must_use]
    pub const fn instant_sell_price(&self) -> f64 {
        self.stats.instant_sell_price
    }

    /// Units purchasable at the best buy price alone.
    ///
    /// This is the quantity the ranking path uses; see
    /// [`Product::ladder_affordable_quantity`] for the depth-aware variant.
    #[must_use]
    pub fn max_affordable_quantity(&self, capital: f64) -> Option<u64> {
        let price = self.top_buy_price()?;
        if price <= 0.0 || !price.is_finite() {
            warn!(product_id = %self.id, price, "Best buy price is not positive");
            return None;
        }
        Some(units(capital / price))
    }

    /// Units purchasable by spending capital down the buy ladder, taking
    /// each level's full amount before moving to the next.
    #[must_use]
    pub fn ladder_affordable_quantity(&self, capital: f64) -> u64 {
        let mut remaining = capital;
        let mut total: u64 = 0;

        for level in self.buy_book.levels() {
            if remaining <= 0.0 {
                break;
            }
            if level.price() <= 0.0 {
                continue;
            }
            let take = units(remaining / level.price()).min(level.amount());
            total = total.saturating_add(take);
            remaining -= take as f64 * level.price();
        }

        total
    }

    /// Units sold per hour, from the weekly sell total.
    #[must_use]
    pub fn sales_velocity_per_hour(&self, policy: &MarketPolicy) -> f64 {
        self.stats.sell_moving_week_total / policy.hours_per_week
    }

    /// Units bought per hour, from the weekly buy total.
    #[must_use]
    pub fn purchase_velocity_per_hour(&self, policy: &MarketPolicy) -> f64 {
        self.stats.buy_moving_week_total / policy.hours_per_week
    }

    /// Hourly throughput bound: the slower of supply and demand.
    #[must_use]
    pub fn velocity_cap(&self, policy: &MarketPolicy) -> u64 {
        units(
            self.sales_velocity_per_hour(policy)
                .min(self.purchase_velocity_per_hour(policy)),
        )
    }

    #[must_use]
    pub fn velocity_limited_quantity(&self, capital: f64, policy: &MarketPolicy) -> Option<u64> {
        let affordable = self.max_affordable_quantity(capital)?;
        Some(affordable.min(self.velocity_cap(policy)))
    }

    /// Instant buy price after the sell-side tax.
    #[must_use]
    pub fn net_sell_price(&self, policy: &MarketPolicy) -> f64 {
        self.stats.instant_buy_price * policy.after_tax()
    }

    /// Margin per unit between the taxed exit and the best buy price.
    #[must_use]
    pub fn unit_margin(&self, policy: &MarketPolicy) -> Option<f64> {
        Some(self.net_sell_price(policy) - self.top_buy_price()?)
    }

    /// Expected profit per hour of flipping this product with `capital`.
    #[must_use]
    pub fn profit_per_hour(&self, capital: f64, policy: &MarketPolicy) -> Option<f64> {
        let quantity = self.velocity_limited_quantity(capital, policy)?;
        Some(quantity as f64 * self.unit_margin(policy)?)
    }

    /// Profit of a single flip of everything affordable, ignoring velocity.
    #[must_use]
    pub fn absolute_profit(&self, capital: f64, policy: &MarketPolicy) -> Option<f64> {
        let quantity = self.max_affordable_quantity(capital)?;
        Some(quantity as f64 * self.unit_margin(policy)?)
    }

    /// Margin as a percentage of the best buy price.
    #[must_use]
    pub fn percentage_profit(&self, policy: &MarketPolicy) -> Option<f64> {
        let cost = self.top_buy_price()?;
        if cost == 0.0 {
            return None;
        }
        Some(self.unit_margin(policy)? / cost * 100.0)
    }

    /// Labels the top-of-book volume imbalance.
    ///
    /// Returns `None` when either ladder is empty or both top amounts are
    /// zero.
    #[must_use]
    pub fn book_imbalance(&self) -> Option<BookImbalance> {
        let sell = self.top_sell_volume()? as f64;
        let buy = self.top_buy_volume()? as f64;
        let total = sell + buy;
        if total == 0.0 {
            warn!(product_id = %self.id, sell, buy, "Book imbalance undefined, no top volume");
            return None;
        }
        BookImbalance::from_ratio((sell - buy) / total)
    }
}

/// Whole units in a non-negative quantity; negatives and NaN become zero.
fn units(quantity: f64) -> u64 {
    // float-to-int casts saturate
    quantity.floor() as u64
}
