//! Bazaar snapshot source.
//!
//! The bazaar endpoint only supports pulling the whole catalogue at once.

pub mod client;
pub mod dto;

pub use client::BazaarClient;
