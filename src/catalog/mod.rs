//! Toggle catalog wiring.
//!
//! This module holds the catalog data model shared by the world document and
//! the channel payload, the builder that derives a default catalog from the
//! definition registry, and `CatalogIndex` for validated lookups.

pub mod builder;
pub mod identity;
pub mod index;
pub mod model;

pub use builder::build_catalog;
pub use identity::{CatalogSection, StaticCategory};
pub use index::CatalogIndex;
pub use model::{ToggleCatalog, ToggleGroup, ToggleRecord};
