//! Bazaar wire types and response validation.
//!
//! Example response (trimmed):
//! ```json
//! {
//!   "success": true,
//!   "lastUpdated": 1700000000000,
//!   "products": {
//!     "WHEAT": {
//!       "product_id": "WHEAT",
//!       "sell_summary": [{"amount": 640, "pricePerUnit": 2.4, "orders": 3}],
//!       "buy_summary": [{"amount": 1200, "pricePerUnit": 2.1, "orders": 9}],
//!       "quick_status": {"sellPrice": 2.3, "buyPrice": 2.5,
//!                        "buyMovingWeek": 904211, "sellMovingWeek": 812003}
//!     }
//!   }
//! }
//! ```
//!
//! The body is first decoded as a [`serde_json::Value`] so each validation
//! rule can be reported on its own. Products are then decoded one at a time;
//! a single malformed product is skipped rather than voiding the snapshot.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{PriceLevel, ProductId, QuickStats};
use crate::error::SourceError;
use crate::port::{CatalogueSnapshot, ProductSnapshot};

const REQUIRED_KEYS: [&str; 3] = ["success", "lastUpdated", "products"];

/// One product entry under `products`.
#[derive(Debug, Deserialize)]
pub struct BazaarProduct {
    #[serde(default)]
    pub sell_summary: Vec<BazaarOrder>,
    #[serde(default)]
    pub buy_summary: Vec<BazaarOrder>,
    pub quick_status: BazaarQuickStatus,
}

/// One level of a summary ladder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BazaarOrder {
    pub amount: u64,
    pub price_per_unit: f64,
    pub orders: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BazaarQuickStatus {
    pub sell_price: f64,
    pub buy_price: f64,
    pub buy_moving_week: f64,
    pub sell_moving_week: f64,
}

impl From<&BazaarOrder> for PriceLevel {
    fn from(order: &BazaarOrder) -> Self {
        PriceLevel::new(order.price_per_unit, order.amount, order.orders)
    }
}

impl From<BazaarProduct> for ProductSnapshot {
    fn from(product: BazaarProduct) -> Self {
        Self {
            buy_levels: product.buy_summary.iter().map(PriceLevel::from).collect(),
            sell_levels: product.sell_summary.iter().map(PriceLevel::from).collect(),
            stats: QuickStats::new(
                product.quick_status.sell_price,
                product.quick_status.buy_price,
                product.quick_status.buy_moving_week,
                product.quick_status.sell_moving_week,
            ),
        }
    }
}

/// Checks the envelope and returns the `products` object.
pub fn validate_response(body: &Value) -> Result<&Map<String, Value>, SourceError> {
    let root = match body {
        Value::Null => return Err(SourceError::Malformed("no response body".into())),
        Value::Object(root) if root.is_empty() => {
            return Err(SourceError::Malformed("empty response object".into()))
        }
        Value::Object(root) => root,
        _ => return Err(SourceError::Malformed("response is not an object".into())),
    };

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !root.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(SourceError::Malformed(format!(
            "missing required keys: {}",
            missing.join(", ")
        )));
    }

    if root.get("success") != Some(&Value::Bool(true)) {
        return Err(SourceError::Malformed("response reported failure".into()));
    }

    root.get("products")
        .and_then(Value::as_object)
        .ok_or_else(|| SourceError::Malformed("products is not an object".into()))
}

/// Validates a full response body and decodes every product in it.
pub fn parse_catalogue(body: &Value) -> Result<CatalogueSnapshot, SourceError> {
    let products = validate_response(body)?;

    let mut snapshot = CatalogueSnapshot::new();
    for (id, raw) in products {
        match BazaarProduct::deserialize(raw) {
            Ok(product) => {
                snapshot.insert(ProductId::new(id.as_str()), product.into());
            }
            Err(err) => warn!(product_id = %id, error = %err, "Skipping malformed product"),
        }
    }

    Ok(snapshot)
}
