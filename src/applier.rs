//! Applies a resolved catalog to the live definition registry.
//!
//! For every record marked not buildable the matching definitions lose their
//! survival availability. Functional records also clear their mirrored
//! counterpart; external (mod) records never follow mirrors. Records whose
//! type resolves to nothing are skipped without error.

use crate::catalog::{CatalogSection, StaticCategory, ToggleCatalog};
use crate::categories::matches_category;
use crate::registry::{DefinitionGroup, DefinitionId, DefinitionRegistry};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// What one application pass did.
pub struct ApplySummary {
    /// Records with `can_build == false` that were considered.
    pub disabled_records: usize,
    /// Records that resolved to no group or no known category.
    pub unresolved_records: usize,
    /// Definitions whose availability flag actually changed.
    pub definitions_cleared: usize,
}

/// Clear survival availability for every disabled record in `catalog`.
pub fn apply_catalog(
    catalog: &ToggleCatalog,
    registry: &mut dyn DefinitionRegistry,
) -> ApplySummary {
    let mut summary = ApplySummary::default();
    for (section, group_key, record) in catalog.disabled() {
        summary.disabled_records += 1;
        let targets = match section {
            CatalogSection::Functional => resolve_group(&*registry, &record.type_name, true),
            CatalogSection::External => resolve_group(&*registry, &record.type_name, false),
            CatalogSection::Classified => resolve_category(&*registry, &record.type_name),
        };
        let Some(targets) = targets else {
            log::debug!(
                "{section} record '{}' (group '{group_key}') resolved to nothing",
                record.type_name
            );
            summary.unresolved_records += 1;
            continue;
        };
        for id in &targets {
            if registry.set_available_in_survival(id, false) {
                summary.definitions_cleared += 1;
            }
        }
        log::debug!(
            "{section} record '{}' disabled {} definition(s)",
            record.type_name,
            targets.len()
        );
    }
    summary
}

fn resolve_group(
    registry: &dyn DefinitionRegistry,
    pair_name: &str,
    follow_mirror: bool,
) -> Option<Vec<DefinitionId>> {
    let group = registry.group(pair_name)?;
    let mut targets: Vec<DefinitionId> = group.variants().cloned().collect();
    if follow_mirror {
        if let Some(mirror) = mirror_group(registry, &group) {
            targets.extend(mirror.variants().cloned());
        }
    }
    Some(targets)
}

fn mirror_group(
    registry: &dyn DefinitionRegistry,
    group: &DefinitionGroup,
) -> Option<DefinitionGroup> {
    let representative = registry.definition(group.any()?)?;
    registry.group(representative.mirror_name()?)
}

fn resolve_category(
    registry: &dyn DefinitionRegistry,
    type_name: &str,
) -> Option<Vec<DefinitionId>> {
    let category = StaticCategory::parse(type_name)?;
    Some(
        registry
            .definitions()
            .filter(|definition| matches_category(category, definition))
            .map(|definition| definition.id.clone())
            .collect(),
    )
}
