//! Ranked flip candidates.

use serde::Serialize;

use super::id::ProductId;
use super::imbalance::BookImbalance;

/// A profit opportunity for one product, created and discarded per scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flip {
    product_id: ProductId,
    profit_per_hour: f64,
    imbalance: Option<BookImbalance>,
}

impl Flip {
    #[must_use]
    pub const fn new(
        product_id: ProductId,
        profit_per_hour: f64,
        imbalance: Option<BookImbalance>,
    ) -> Self {
        Self {
            product_id,
            profit_per_hour,
            imbalance,
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    #[must_use]
    pub const fn profit_per_hour(&self) -> f64 {
        self.profit_per_hour
    }

    /// `None` when the top-of-book imbalance was undefined.
    #[must_use]
    pub const fn imbalance(&self) -> Option<BookImbalance> {
        self.imbalance
    }
}
