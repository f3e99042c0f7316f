//! Builds a default toggle catalog from the live definition registry.
//!
//! Every functional, public definition contributes one record per pairing
//! identity. A one-way mirror collapses into the pair it mirrors; mutual
//! mirrors collapse into the first pair seen. Built-in
//! definitions are grouped by type id, mod definitions by mod id. A handful
//! of built-in blocks without a behaviour component are listed explicitly,
//! and the classified section always carries one record per
//! `StaticCategory`.

use crate::catalog::{StaticCategory, ToggleCatalog, ToggleGroup, ToggleRecord};
use crate::registry::{BlockDefinition, DefinitionRegistry, Provenance};
use std::collections::{BTreeMap, BTreeSet};

// Never offered as a toggle.
const EXCLUDED_DEFINITION: (&str, &str) = ("MyObjectBuilder_Assembler", "BasicAssembler");

// Built-in blocks the functional scan cannot discover.
const BUILT_IN_EXTRAS: &[(&str, &[&str])] = &[
    (
        "MyObjectBuilder_CargoContainer",
        &[
            "DisplayName_Block_Freight1",
            "DisplayName_Block_Freight2",
            "DisplayName_Block_Freight3",
        ],
    ),
    (
        "MyObjectBuilder_CubeBlock",
        &[
            "DisplayName_Block_Shower",
            "DeskChairless",
            "DeskChairlessCorner",
            "DeskChairlessCornerInv",
            "EngineerPlushie",
        ],
    ),
    (
        "MyObjectBuilder_TerminalBlock",
        &["ControlPanel", "SciFiTerminal"],
    ),
    ("MyObjectBuilder_Ladder2", &["Ladder2", "LadderShaft"]),
];

/// Scan `registry` and produce a catalog with every record buildable.
///
/// Groups come out ordered by key and records ordered by type, so two
/// builds over the same registry serialize identically.
pub fn build_catalog(registry: &dyn DefinitionRegistry) -> ToggleCatalog {
    let mut built_in: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut modded: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for definition in registry.definitions() {
        if !definition.functional || !definition.public {
            continue;
        }
        if definition.id.type_id == EXCLUDED_DEFINITION.0
            && definition.id.subtype == EXCLUDED_DEFINITION.1
        {
            continue;
        }
        if seen.contains(&definition.pair_name)
            || definition.mirror_name().is_some_and(|mirror| seen.contains(mirror))
        {
            continue;
        }
        let pair_name = record_pair(registry, definition);
        let Some(group) = registry.group(pair_name) else {
            continue;
        };

        seen.insert(definition.pair_name.clone());
        if let Some(mirror) = definition.mirror_name() {
            seen.insert(mirror.to_string());
        }

        let Some(representative) = group.any().and_then(|id| registry.definition(id)) else {
            continue;
        };
        let type_id = if pair_name == definition.pair_name {
            &definition.id.type_id
        } else {
            &representative.id.type_id
        };
        match &representative.provenance {
            Provenance::BaseGame => {
                built_in
                    .entry(type_id.clone())
                    .or_default()
                    .insert(pair_name.to_string());
            }
            Provenance::Mod(mod_id) => {
                modded
                    .entry(mod_id.clone())
                    .or_default()
                    .insert(pair_name.to_string());
            }
        }
    }

    for (type_id, names) in BUILT_IN_EXTRAS {
        let entry = built_in.entry((*type_id).to_string()).or_default();
        entry.extend(names.iter().map(|name| (*name).to_string()));
    }

    let catalog = ToggleCatalog {
        classified: StaticCategory::ALL
            .iter()
            .map(|category| ToggleRecord::new(category.as_str()))
            .collect(),
        functional: into_groups(built_in),
        external: into_groups(modded),
    };
    log::debug!(
        "built catalog: {} functional groups, {} external groups, {} categories",
        catalog.functional.len(),
        catalog.external.len(),
        catalog.classified.len()
    );
    catalog
}

/// Pairing identity a definition is listed under.
///
/// A one-way mirror is listed under its target; a definition without a
/// resolvable mirror, or one whose mirror points back, keeps its own pair.
fn record_pair<'r>(
    registry: &'r dyn DefinitionRegistry,
    definition: &'r BlockDefinition,
) -> &'r str {
    let Some(mirror) = definition.mirror_name() else {
        return &definition.pair_name;
    };
    let points_back = registry
        .group(mirror)
        .and_then(|group| group.any().and_then(|id| registry.definition(id)))
        .map(|target| target.mirror_name() == Some(definition.pair_name.as_str()));
    match points_back {
        Some(false) => mirror,
        _ => &definition.pair_name,
    }
}

fn into_groups(table: BTreeMap<String, BTreeSet<String>>) -> Vec<ToggleGroup> {
    table
        .into_iter()
        .map(|(key, names)| ToggleGroup::new(key, names.into_iter().map(ToggleRecord::new).collect()))
        .collect()
}
