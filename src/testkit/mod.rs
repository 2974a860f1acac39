//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`]: Scripted [`CatalogueSource`](crate::port::CatalogueSource)
//!   for driving the catalogue and scanner without a network.
//! - [`domain`]: Builders for ladders, product snapshots and catalogues.

pub mod domain;
pub mod source;
