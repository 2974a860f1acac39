//! Flipscan - order-book refinement and flip ranking.
//!
//! Given live two-sided order ladders and weekly trade totals for every
//! product on a bazaar-style market, flipscan finds the products where
//! buying at the best buy price and reselling instantly earns the most per
//! hour under a capital limit.
//!
//! # Modules
//!
//! - [`domain`] - Ladders, refinement, the product profit model, top-K ranking
//! - [`port`] - The [`CatalogueSource`](port::CatalogueSource) trait
//! - [`adapter`] - Bazaar HTTP source
//! - [`app`] - Configuration, catalogue cache, scan orchestration
//! - [`cli`] - Command-line arguments
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use flipscan::adapter::bazaar::BazaarClient;
//! use flipscan::app::{Config, Scanner};
//!
//! # async fn demo() {
//! let config = Config::default();
//! let source = BazaarClient::from_config(&config.source);
//! let mut scanner = Scanner::new(&config, Box::new(source));
//! let report = scanner.scan_once().await;
//! report.render(&mut std::io::stdout(), None).ok();
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
