//! Trait definitions for external collaborators. Depend only on domain.
//!
//! Ports are the seams adapters plug into. The scanner only ever talks to a
//! [`CatalogueSource`]; the HTTP implementation lives in
//! [`crate::adapter::bazaar`], and tests substitute scripted sources.
//!
//! ```text
//!   ┌──────────────┐      ┌──────────────────┐      ┌─────────────┐
//!   │ Bazaar HTTP  │ ───▶ │ CatalogueSource  │ ───▶ │  Catalogue  │
//!   │   adapter    │      │      (port)      │      │    cache    │
//!   └──────────────┘      └──────────────────┘      └─────────────┘
//! ```

mod source;

pub use source::{CatalogueSnapshot, CatalogueSource, ProductSnapshot};
