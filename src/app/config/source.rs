//! Catalogue source configuration (`[source]`).

use serde::Deserialize;

/// HTTP settings for the bazaar endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout in milliseconds; also bounds the whole fetch.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_url() -> String {
    "https://api.hypixel.net/v2/skyblock/bazaar".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Scan loop cadence (`[scan]`).
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Minimum delay between scan cycles, even when nothing was refreshed.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

const fn default_min_interval_ms() -> u64 {
    1_000
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}
