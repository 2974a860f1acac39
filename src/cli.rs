//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::app::{Config, LogFormat};
use crate::error::Result;

/// Flipscan - rank instant-resell flips from a live bazaar order book.
#[derive(Parser, Debug)]
#[command(name = "flipscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Coins available to invest
    #[arg(long)]
    pub capital: Option<f64>,

    /// Number of flips to show
    #[arg(long)]
    pub top: Option<usize>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Run a single scan and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Load the configuration file (if any) and apply CLI overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(capital) = self.capital {
            config.market.capital = capital;
        }
        if let Some(top) = self.top {
            config.market.max_flips_shown = top;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }

        config.validate()?;
        Ok(config)
    }
}
