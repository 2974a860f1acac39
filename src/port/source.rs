//! Catalogue source port.
//!
//! A source returns a full snapshot of every product in one call; there is
//! no partial or incremental fetch.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{PriceLevel, ProductId, QuickStats};
use crate::error::SourceError;

/// Raw, unrefined data for one product as delivered by a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSnapshot {
    /// Buy-side levels, best price first.
    pub buy_levels: Vec<PriceLevel>,
    /// Sell-side levels, best price first.
    pub sell_levels: Vec<PriceLevel>,
    pub stats: QuickStats,
}

/// Full catalogue pulled in one request, keyed by product.
pub type CatalogueSnapshot = BTreeMap<ProductId, ProductSnapshot>;

/// Provider of full catalogue snapshots.
///
/// Implementations report transport and payload problems as
/// [`SourceError`]; they never panic on bad input.
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Fetch every product currently listed.
    async fn fetch(&self) -> Result<CatalogueSnapshot, SourceError>;

    /// Get the source name for logging/debugging.
    fn source_name(&self) -> &'static str;
}
