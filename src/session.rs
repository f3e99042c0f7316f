//! World-load entry point.
//!
//! Hosts call `load_world` once per world load with their registry, world
//! storage and shared variables; nothing is kept in process-wide state. The
//! returned outcome owns the resolved catalog, which is not mutated or
//! persisted again for the rest of the session.

use crate::applier::{ApplySummary, apply_catalog};
use crate::catalog::ToggleCatalog;
use crate::registry::DefinitionRegistry;
use crate::store::{
    CatalogSource, CatalogStore, PendingWrite, Role, SharedVariables, StoreSettings, WorldStorage,
};
use std::sync::Arc;

/// Everything a world load resolved and changed.
pub struct SessionOutcome {
    pub catalog: ToggleCatalog,
    pub source: CatalogSource,
    pub applied: ApplySummary,
    /// Background document write, present only on an authority's first run.
    pub pending_write: Option<PendingWrite>,
}

/// Resolve the catalog for `role` and apply it to `registry`.
pub fn load_world(
    registry: &mut dyn DefinitionRegistry,
    storage: Arc<dyn WorldStorage>,
    variables: &dyn SharedVariables,
    role: Role,
    settings: StoreSettings,
) -> SessionOutcome {
    let store = CatalogStore::new(storage, variables, role, settings);
    let loaded = store.load(&*registry);
    let applied = apply_catalog(&loaded.catalog, registry);
    log::info!(
        "block toggles applied as {:?} from {:?}: {} disabled record(s), {} definition(s) cleared, {} unresolved",
        store.role(),
        loaded.source,
        applied.disabled_records,
        applied.definitions_cleared,
        applied.unresolved_records
    );
    SessionOutcome {
        catalog: loaded.catalog,
        source: loaded.source,
        applied,
        pending_write: loaded.pending_write,
    }
}
