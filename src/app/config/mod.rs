//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section and field has a
//! default, so an empty file (or no file at all) yields the stock policy.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

mod logging;
mod market;
mod source;

pub use logging::{LogFormat, LoggingConfig};
pub use market::MarketConfig;
pub use source::{ScanConfig, SourceConfig};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let market = &self.market;

        if !(market.hours_per_week.is_finite() && market.hours_per_week > 0.0) {
            return Err(invalid("hours_per_week", "must be a positive number"));
        }
        if market.max_flips_shown == 0 {
            return Err(invalid("max_flips_shown", "must be at least 1"));
        }
        if !(market.capital.is_finite() && market.capital > 0.0) {
            return Err(invalid("capital", "must be a positive number"));
        }
        if !(0.0..100.0).contains(&market.tax_rate_pct) {
            return Err(invalid("tax_rate_pct", "must be in [0, 100)"));
        }

        let thresholds = [
            ("same_order_threshold_pct", market.same_order_threshold_pct),
            (
                "manipulated_price_threshold_pct",
                market.manipulated_price_threshold_pct,
            ),
            (
                "manipulated_order_threshold_pct",
                market.manipulated_order_threshold_pct,
            ),
        ];
        for (field, value) in thresholds {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }

        if self.source.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "url" }.into());
        }
        if self.source.timeout_ms == 0 {
            return Err(invalid("timeout_ms", "must be greater than zero"));
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
