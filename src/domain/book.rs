//! Order ladder types for one side of a product's book.
//!
//! - [`PriceLevel`] - A single rung: price, total amount, number of orders
//! - [`Ladder`] - One side of the book, best price first
//!
//! Ladders arrive pre-sorted from the source. Nothing in this crate ever
//! re-sorts them; refinement only drops or merges adjacent levels, so the
//! best-to-worst order is preserved.
//!
//! # Examples
//!
//! ```
//! use flipscan::domain::{Ladder, PriceLevel};
//!
//! let ladder = Ladder::new(vec![
//!     PriceLevel::new(10.0, 64, 3),
//!     PriceLevel::new(9.8, 200, 11),
//! ]);
//!
//! assert_eq!(ladder.best().map(PriceLevel::price), Some(10.0));
//! assert_eq!(ladder.total_amount(), 264);
//! ```

/// A single price level in a ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevel {
    /// Price per unit at this level.
    price: f64,
    /// Total units offered at this price.
    amount: u64,
    /// Number of distinct orders making up the amount.
    order_count: u64,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: f64, amount: u64, order_count: u64) -> Self {
        Self {
            price,
            amount,
            order_count,
        }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Returns the total amount available at this level.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// Returns the number of orders at this level.
    #[must_use]
    pub const fn order_count(&self) -> u64 {
        self.order_count
    }

    /// Price times amount.
    #[must_use]
    pub fn valuation(&self) -> f64 {
        self.price * self.amount as f64
    }
}

/// One side of a product's order book, sorted best price first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ladder {
    levels: Vec<PriceLevel>,
}

impl Ladder {
    /// Wraps levels that are already sorted best-to-worst.
    #[must_use]
    pub fn new(levels: Vec<PriceLevel>) -> Self {
        Self { levels }
    }

    /// Returns all levels, best first.
    #[must_use]
    pub fn levels(&self) -> &[PriceLevel] {
        &self.levels
    }

    /// Returns the best (first) level.
    #[must_use]
    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Sum of amounts across all levels, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.levels
            .iter()
            .fold(0, |total: u64, level| total.saturating_add(level.amount))
    }

    /// Sum of price times amount across all levels.
    #[must_use]
    pub fn total_valuation(&self) -> f64 {
        self.levels.iter().map(PriceLevel::valuation).sum()
    }

    /// Replaces the levels, reusing the existing allocation.
    pub fn replace(&mut self, levels: impl IntoIterator<Item = PriceLevel>) {
        self.levels.clear();
        self.levels.extend(levels);
    }

    pub(crate) fn levels_mut(&mut self) -> &mut Vec<PriceLevel> {
        &mut self.levels
    }
}

impl From<Vec<PriceLevel>> for Ladder {
    fn from(levels: Vec<PriceLevel>) -> Self {
        Self::new(levels)
    }
}

impl FromIterator<PriceLevel> for Ladder {
    fn from_iter<I: IntoIterator<Item = PriceLevel>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ladder_has_no_best() {
        let ladder = Ladder::default();
        assert!(ladder.is_empty());
        assert!(ladder.best().is_none());
        assert_eq!(ladder.total_amount(), 0);
    }

    #[test]
    fn totals_cover_every_level() {
        let ladder: Ladder = vec![PriceLevel::new(2.0, 5, 1), PriceLevel::new(1.5, 4, 2)].into();
        assert_eq!(ladder.total_amount(), 9);
        assert!((ladder.total_valuation() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn replace_keeps_order() {
        let mut ladder = Ladder::new(vec![PriceLevel::new(1.0, 1, 1)]);
        ladder.replace([PriceLevel::new(3.0, 1, 1), PriceLevel::new(2.0, 1, 1)]);
        assert_eq!(ladder.len(), 2);
        assert_eq!(ladder.best().unwrap().price(), 3.0);
    }

    #[test]
    fn total_amount_saturates() {
        let ladder = Ladder::new(vec![PriceLevel::new(1.0, u64::MAX, 1), PriceLevel::new(1.0, 2, 1)]);
        assert_eq!(ladder.total_amount(), u64::MAX);
    }
}
