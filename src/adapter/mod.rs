//! Implementations of ports.

pub mod bazaar;
