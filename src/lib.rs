//! Shared library for block-toggles.
//!
//! At world load the crate resolves a catalog of which block definitions may
//! be built in survival, keeps it in sync between the authority and every
//! other participant, and flips the availability flag on the host registry.
//!
//! The pieces, in call order:
//! - `store::CatalogStore` reads the world document or the shared channel and
//!   falls back to `catalog::build_catalog` when neither is usable;
//! - `applier::apply_catalog` clears availability for disabled records, using
//!   the `categories` table for structural blocks;
//! - `session::load_world` wires both together for hosts.
//!
//! Hosts plug in through the `DefinitionRegistry`, `WorldStorage` and
//! `SharedVariables` traits.

pub mod applier;
pub mod catalog;
pub mod categories;
pub mod error;
pub mod registry;
pub mod schema_loader;
pub mod session;
pub mod store;

pub use applier::{ApplySummary, apply_catalog};
pub use catalog::{
    CatalogIndex, CatalogSection, StaticCategory, ToggleCatalog, ToggleGroup, ToggleRecord,
    build_catalog,
};
pub use categories::{DescriptionMatcher, matches_category, rules_for};
pub use error::StoreError;
pub use registry::{
    BlockDefinition, BlockRegistry, CubeSize, DefinitionGroup, DefinitionId, DefinitionRegistry,
    Provenance,
};
pub use schema_loader::CatalogSchema;
pub use session::{SessionOutcome, load_world};
pub use store::{
    CatalogSource, CatalogStore, FsWorldStorage, LoadOutcome, MemoryVariables, PendingWrite, Role,
    SharedVariables, StoreSettings, WorldStorage,
};
