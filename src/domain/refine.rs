//! Order ladder refinement.
//!
//! Two passes run over each side of every product when it is ingested:
//!
//! 1. **Suspicious-order removal** drops levels at the very top of the book
//!    whose price *and* order count both jump away from the next level.
//! 2. **Similar-order bundling** merges consecutive levels whose price is
//!    within the same-order threshold of an anchor price into one
//!    volume-weighted level.
//!
//! Both passes rely on the ladder being sorted best-to-worst and never
//! reorder it.

use tracing::trace;

use super::book::{Ladder, PriceLevel};
use super::math::percent_diff;
use super::policy::{BundleAnchor, MarketPolicy};

/// Applies both refinement passes using a fixed set of thresholds.
#[derive(Debug, Clone, Copy)]
pub struct Refiner {
    same_order_threshold_pct: f64,
    manipulated_price_threshold_pct: f64,
    manipulated_order_threshold_pct: f64,
    anchor: BundleAnchor,
}

impl Refiner {
    #[must_use]
    pub const fn new(policy: &MarketPolicy) -> Self {
        Self {
            same_order_threshold_pct: policy.same_order_threshold_pct,
            manipulated_price_threshold_pct: policy.manipulated_price_threshold_pct,
            manipulated_order_threshold_pct: policy.manipulated_order_threshold_pct,
            anchor: policy.bundle_anchor,
        }
    }

    /// Trims suspicious top levels, then bundles similar ones, in place.
    pub fn refine(&self, ladder: &mut Ladder) {
        self.remove_suspicious(ladder);
        self.bundle_similar(ladder);
    }

    /// Returns true when `top` looks like bait placed against `next`.
    ///
    /// Both the price and the order count must jump; either alone is normal
    /// in thin markets.
    #[must_use]
    pub fn is_manipulated(&self, top: &PriceLevel, next: &PriceLevel) -> bool {
        percent_diff(top.price(), next.price()) > self.manipulated_price_threshold_pct
            && percent_diff(top.order_count() as f64, next.order_count() as f64)
                > self.manipulated_order_threshold_pct
    }

    /// Drops the contiguous run of manipulated levels at the top of the book.
    ///
    /// Only the current top two levels are ever compared, so a suspicious
    /// level further down is left alone.
    pub fn remove_suspicious(&self, ladder: &mut Ladder) {
        let cut = self.suspicious_prefix(ladder.levels());
        if cut > 0 {
            trace!(removed = cut, "Dropping suspicious top-of-book levels");
            ladder.levels_mut().drain(..cut);
        }
    }

    /// Number of leading levels judged manipulated.
    #[must_use]
    pub fn suspicious_prefix(&self, levels: &[PriceLevel]) -> usize {
        let mut top = 0;
        while top + 1 < levels.len() && self.is_manipulated(&levels[top], &levels[top + 1]) {
            top += 1;
        }
        top
    }

    /// Merges runs of levels close to the anchor price.
    pub fn bundle_similar(&self, ladder: &mut Ladder) {
        if ladder.len() <= 1 {
            return;
        }
        let bundled = self.bundled(ladder.levels());
        ladder.replace(bundled);
    }

    /// Bundled copy of `levels`.
    #[must_use]
    pub fn bundled(&self, levels: &[PriceLevel]) -> Vec<PriceLevel> {
        let Some(first) = levels.first() else {
            return Vec::new();
        };

        let mut target = first.price();
        let mut out = Vec::with_capacity(levels.len());
        let mut bundle = Bundle::seeded(first);

        for level in &levels[1..] {
            if percent_diff(target, level.price()) < self.same_order_threshold_pct {
                bundle.fold(level);
            } else {
                out.push(bundle.close());
                bundle = Bundle::seeded(level);
                if self.anchor == BundleAnchor::Rolling {
                    target = level.price();
                }
            }
        }
        out.push(bundle.close());
        out
    }
}

impl Default for Refiner {
    fn default() -> Self {
        Self::new(&MarketPolicy::default())
    }
}

/// Running accumulator for a group of similar levels.
#[derive(Debug, Clone, Copy)]
struct Bundle {
    amount: u64,
    total_valuation: f64,
    order_count: u64,
    /// Price reported if the bundle holds no amount to weight by.
    seed_price: f64,
}

impl Bundle {
    fn seeded(level: &PriceLevel) -> Self {
        Self {
            amount: level.amount(),
            total_valuation: level.valuation(),
            order_count: level.order_count(),
            seed_price: level.price(),
        }
    }

    fn fold(&mut self, level: &PriceLevel) {
        // amounts come off the wire unchecked
        self.amount = self.amount.saturating_add(level.amount());
        self.total_valuation += level.valuation();
        self.order_count = self.order_count.saturating_add(level.order_count());
    }

    fn close(self) -> PriceLevel {
        let price = if self.amount == 0 {
            self.seed_price
        } else {
            self.total_valuation / self.amount as f64
        };
        PriceLevel::new(price, self.amount, self.order_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(price: f64, amount: u64, orders: u64) -> PriceLevel {
        PriceLevel::new(price, amount, orders)
    }

    fn refiner(price_pct: f64, order_pct: f64, same_pct: f64) -> Refiner {
        Refiner::new(&MarketPolicy {
            manipulated_price_threshold_pct: price_pct,
            manipulated_order_threshold_pct: order_pct,
            same_order_threshold_pct: same_pct,
            ..MarketPolicy::default()
        })
    }

    #[test]
    fn short_ladders_are_untouched() {
        let refiner = refiner(1.0, 1.0, 1.0);
        let mut ladder = Ladder::new(vec![level(5.0, 1, 1)]);
        refiner.remove_suspicious(&mut ladder);
        refiner.bundle_similar(&mut ladder);
        assert_eq!(ladder.levels(), &[level(5.0, 1, 1)]);

        let mut empty = Ladder::default();
        refiner.refine(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn bait_level_is_trimmed() {
        // 1000 vs 10 is a 49% jump under the half-sum formula, 1 vs 500 orders ~49.8%.
        let refiner = refiner(40.0, 45.0, 1.0);
        let mut ladder = Ladder::new(vec![
            level(1000.0, 1, 1),
            level(10.0, 640, 500),
            level(9.9, 700, 510),
        ]);

        refiner.remove_suspicious(&mut ladder);

        assert_eq!(ladder.len(), 2);
        assert_eq!(ladder.best().unwrap().price(), 10.0);
    }

    #[test]
    fn price_jump_alone_is_not_manipulation() {
        let refiner = refiner(40.0, 45.0, 1.0);
        let mut ladder = Ladder::new(vec![level(1000.0, 1, 500), level(10.0, 640, 500)]);
        refiner.remove_suspicious(&mut ladder);
        assert_eq!(ladder.len(), 2);
    }

    #[test]
    fn contiguous_run_is_trimmed() {
        let refiner = refiner(10.0, 10.0, 1.0);
        let mut ladder = Ladder::new(vec![
            level(500.0, 1, 1),
            level(100.0, 1, 10),
            level(10.0, 5, 100),
            level(9.9, 5, 101),
        ]);
        refiner.remove_suspicious(&mut ladder);
        assert_eq!(ladder.best().unwrap().price(), 10.0);
        assert_eq!(ladder.len(), 2);
    }

    #[test]
    fn inner_outlier_survives() {
        let refiner = refiner(10.0, 10.0, 1.0);
        let mut ladder = Ladder::new(vec![
            level(10.0, 5, 100),
            level(9.9, 5, 101),
            level(1.0, 1, 1),
        ]);
        refiner.remove_suspicious(&mut ladder);
        assert_eq!(ladder.len(), 3);
    }

    #[test]
    fn default_thresholds_never_trip_on_positive_ladders() {
        // The half-sum formula tops out at 50% for positive operands.
        let refiner = Refiner::default();
        let levels = [level(1_000_000.0, 1, 1), level(0.01, 1, 10_000)];
        assert_eq!(refiner.suspicious_prefix(&levels), 0);
    }

    #[test]
    fn near_prices_fold_into_one_level() {
        let refiner = refiner(50.0, 200.0, 1.0);
        let mut ladder = Ladder::new(vec![
            level(10.00, 5, 1),
            level(10.05, 3, 2),
            level(10.10, 2, 3),
        ]);

        refiner.bundle_similar(&mut ladder);

        assert_eq!(ladder.len(), 1);
        let merged = ladder.best().unwrap();
        assert_eq!(merged.amount(), 10);
        assert_eq!(merged.order_count(), 6);
        assert!((merged.price() - 10.035).abs() < 1e-9);
    }

    #[test]
    fn fixed_anchor_compares_against_first_price() {
        // Threshold 1% under the half-sum formula is roughly a 4% price gap.
        let refiner = refiner(50.0, 200.0, 1.0);
        let levels = [
            level(100.0, 1, 1),
            level(97.0, 1, 1),
            level(94.5, 1, 1),
            level(94.0, 1, 1),
        ];

        let out = refiner.bundled(&levels);

        // 97 joins the head; 94.5 and 94 are each too far from 100.
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].amount(), 2);
        assert_eq!(out[1].price(), 94.5);
        assert_eq!(out[2].price(), 94.0);
    }

    #[test]
    fn rolling_anchor_reanchors_each_bundle() {
        let refiner = Refiner::new(&MarketPolicy {
            bundle_anchor: BundleAnchor::Rolling,
            ..MarketPolicy::default()
        });
        let levels = [
            level(100.0, 1, 1),
            level(97.0, 1, 1),
            level(94.5, 1, 1),
            level(94.0, 1, 1),
        ];

        let out = refiner.bundled(&levels);

        assert_eq!(out.len(), 2);
        assert_eq!(out[1].amount(), 2);
        assert!((out[1].price() - 94.25).abs() < 1e-9);
    }

    #[test]
    fn zero_amount_bundle_keeps_seed_price() {
        let refiner = Refiner::default();
        let out = refiner.bundled(&[level(4.0, 0, 1), level(1.0, 0, 1)]);
        assert_eq!(out[0].price(), 4.0);
        assert_eq!(out[1].price(), 1.0);
    }

    #[test]
    fn huge_amounts_saturate_when_bundled() {
        let mut ladder = Ladder::new(vec![level(10.0, u64::MAX, u64::MAX), level(10.0, 1, 1)]);

        Refiner::default().refine(&mut ladder);

        let merged = ladder.best().unwrap();
        assert_eq!(ladder.len(), 1);
        assert_eq!(merged.amount(), u64::MAX);
        assert_eq!(merged.order_count(), u64::MAX);
        assert!((merged.price() - 10.0).abs() < 1e-9);
    }
}
