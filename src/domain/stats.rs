//! Aggregate trade statistics reported alongside a product's ladders.

/// Quick-trade prices and weekly moving volume totals.
///
/// These come straight from the source and are independent of the
/// refined ladders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuickStats {
    /// Price received when selling instantly.
    pub instant_sell_price: f64,
    /// Price paid when buying instantly; the flip exits at this price.
    pub instant_buy_price: f64,
    /// Units bought over the trailing week.
    pub buy_moving_week_total: f64,
    /// Units sold over the trailing week.
    pub sell_moving_week_total: f64,
}

impl QuickStats {
    #[must_use]
    pub const fn new(
        instant_sell_price: f64,
        instant_buy_price: f64,
        buy_moving_week_total: f64,
        sell_moving_week_total: f64,
    ) -> Self {
        Self {
            instant_sell_price,
            instant_buy_price,
            buy_moving_week_total,
            sell_moving_week_total,
        }
    }
}
