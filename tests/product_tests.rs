//! Refinement and profit scenarios through the public API.

use flipscan::domain::{MarketPolicy, QuickStats, Refiner};
use flipscan::testkit::domain::{ladder, product};

#[test]
fn capital_and_velocity_bound_profit() {
    let wheat = product(
        "WHEAT",
        ladder(&[(10.0, 1_000, 12), (9.9, 4_000, 30)]),
        ladder(&[(12.4, 800, 9)]),
        QuickStats::new(9.8, 12.0, 1680.0, 1680.0),
    );
    let policy = MarketPolicy::default();

    assert_eq!(wheat.max_affordable_quantity(1_000_000.0), Some(100_000));
    assert_eq!(wheat.velocity_cap(&policy), 10);
    assert_eq!(wheat.velocity_limited_quantity(1_000_000.0, &policy), Some(10));
    let profit = wheat.profit_per_hour(1_000_000.0, &policy).expect("tradeable");
    assert!((profit - 18.8).abs() < 1e-9);

    // The depth-aware walk buys the whole book instead.
    assert_eq!(wheat.ladder_affordable_quantity(1_000_000.0), 5_000);
}

#[test]
fn bait_order_is_removed_before_bundling() {
    // Thresholds sit inside the 0-50% range of the half-sum metric.
    let refiner = Refiner::new(&MarketPolicy {
        manipulated_price_threshold_pct: 40.0,
        manipulated_order_threshold_pct: 45.0,
        ..MarketPolicy::default()
    });
    let mut wheat = product(
        "WHEAT",
        ladder(&[(1000.0, 1, 1), (10.0, 640, 500), (9.9, 700, 510)]),
        ladder(&[(12.0, 100, 4)]),
        QuickStats::default(),
    );

    wheat.refine(&refiner);

    // 9.9 is within 1% of 10 under the metric, so the survivors merge.
    let book = wheat.buy_book();
    assert_eq!(book.len(), 1);
    assert_eq!(book.total_amount(), 1_340);
    let best = wheat.top_buy_price().expect("non-empty");
    assert!(best < 10.0 && best > 9.9);
}

#[test]
fn close_prices_bundle_into_weighted_level() {
    let mut carrot = product(
        "CARROT",
        ladder(&[(10.00, 5, 1), (10.05, 3, 1), (10.10, 2, 1)]),
        ladder(&[(11.0, 1, 1)]),
        QuickStats::default(),
    );

    carrot.refine(&Refiner::default());

    let level = carrot.buy_book().best().expect("one level");
    assert_eq!(carrot.buy_book().len(), 1);
    assert_eq!(level.amount(), 10);
    assert_eq!(level.order_count(), 3);
    assert!((level.price() - 10.035).abs() < 1e-9);
}

#[test]
fn illiquid_product_is_not_tradeable() {
    let dust = product(
        "DUST",
        ladder(&[(1.0, 10, 1)]),
        ladder(&[]),
        QuickStats::default(),
    );
    assert!(!dust.is_tradeable());
    assert_eq!(dust.book_imbalance(), None);
}
