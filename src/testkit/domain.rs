//! Builders for domain primitives used across tests.

use crate::domain::{Ladder, PriceLevel, Product, ProductId, QuickStats};
use crate::port::{CatalogueSnapshot, ProductSnapshot};

/// Create a [`PriceLevel`].
pub fn level(price: f64, amount: u64, orders: u64) -> PriceLevel {
    PriceLevel::new(price, amount, orders)
}

/// Create a [`Ladder`] from `(price, amount, orders)` tuples.
pub fn ladder(levels: &[(f64, u64, u64)]) -> Ladder {
    levels
        .iter()
        .map(|&(price, amount, orders)| level(price, amount, orders))
        .collect()
}

/// A one-level-per-side snapshot that buys at `buy_price`, exits at
/// `instant_buy`, and trades 10 units an hour both ways.
pub fn product_snapshot(buy_price: f64, instant_buy: f64) -> ProductSnapshot {
    ProductSnapshot {
        buy_levels: vec![level(buy_price, 100, 10)],
        sell_levels: vec![level(instant_buy, 100, 10)],
        stats: QuickStats::new(buy_price, instant_buy, 1680.0, 1680.0),
    }
}

/// A snapshot whose sell side is empty, so the product is not tradeable.
pub fn illiquid_snapshot(buy_price: f64) -> ProductSnapshot {
    ProductSnapshot {
        buy_levels: vec![level(buy_price, 100, 10)],
        sell_levels: Vec::new(),
        stats: QuickStats::new(buy_price, buy_price, 1680.0, 1680.0),
    }
}

/// Collect `(id, snapshot)` pairs into a [`CatalogueSnapshot`].
pub fn snapshot<'a>(
    products: impl IntoIterator<Item = (&'a str, ProductSnapshot)>,
) -> CatalogueSnapshot {
    products
        .into_iter()
        .map(|(id, product)| (ProductId::new(id), product))
        .collect()
}

/// Build a [`Product`] directly, without refinement.
pub fn product(id: &str, buy: Ladder, sell: Ladder, stats: QuickStats) -> Product {
    Product::new(ProductId::new(id), buy, sell, stats)
}
