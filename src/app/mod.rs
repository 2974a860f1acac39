//! Application layer - configuration, catalogue cache and scan orchestration.

mod catalogue;
mod config;
mod report;
mod scanner;

pub use catalogue::{Catalogue, RefreshOutcome};
pub use config::{Config, LogFormat, LoggingConfig, MarketConfig, ScanConfig, SourceConfig};
pub use scanner::{ScanReport, Scanner};
