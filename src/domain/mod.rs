//! Pure order-book and profitability logic.
//!
//! Nothing here performs I/O or blocks; the catalogue and scanner in
//! [`crate::app`] drive these types once per scan.

mod book;
mod flip;
mod id;
mod imbalance;
mod math;
mod policy;
mod product;
mod ranking;
mod refine;
mod stats;

pub use book::{Ladder, PriceLevel};
pub use flip::Flip;
pub use id::ProductId;
pub use imbalance::BookImbalance;
pub use math::{percent_diff, UNDEFINED_DIFF};
pub use policy::{BundleAnchor, MarketPolicy};
pub use product::Product;
pub use ranking::TopFlips;
pub use refine::Refiner;
pub use stats::QuickStats;
