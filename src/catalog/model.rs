//! Serializable representation of the toggle catalog.
//!
//! The same structs back the persisted world document (JSON) and the compact
//! channel payload (bincode), so field order and defaults here are part of
//! both formats. Use `CatalogIndex` for invariant checks and lookups.

use crate::catalog::identity::CatalogSection;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// One named block (or category) with its build-availability flag.
pub struct ToggleRecord {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_can_build")]
    pub can_build: bool,
}

fn default_can_build() -> bool {
    true
}

impl ToggleRecord {
    /// New record, buildable by default.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            can_build: true,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// Records sharing a grouping key (definition type id or mod id).
pub struct ToggleGroup {
    pub group_key: String,
    #[serde(default)]
    pub records: Vec<ToggleRecord>,
}

impl ToggleGroup {
    /// Group with records sorted by type.
    pub fn new(group_key: impl Into<String>, mut records: Vec<ToggleRecord>) -> Self {
        records.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        Self {
            group_key: group_key.into(),
            records,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
/// Full set of toggle decisions for one world.
pub struct ToggleCatalog {
    #[serde(default)]
    pub classified: Vec<ToggleRecord>,
    #[serde(default)]
    pub functional: Vec<ToggleGroup>,
    #[serde(default)]
    pub external: Vec<ToggleGroup>,
}

impl ToggleCatalog {
    /// Iterate every record with `can_build == false`.
    ///
    /// Classified records report an empty group key.
    pub fn disabled(&self) -> impl Iterator<Item = (CatalogSection, &str, &ToggleRecord)> {
        let classified = self
            .classified
            .iter()
            .map(|record| (CatalogSection::Classified, "", record));
        let functional = grouped(CatalogSection::Functional, &self.functional);
        let external = grouped(CatalogSection::External, &self.external);
        classified
            .chain(functional)
            .chain(external)
            .filter(|(_, _, record)| !record.can_build)
    }

    /// Flip `can_build` on every record of `section` whose type matches.
    ///
    /// Returns the number of records updated.
    pub fn set_can_build(
        &mut self,
        section: CatalogSection,
        type_name: &str,
        can_build: bool,
    ) -> usize {
        let mut updated = 0;
        let records: Box<dyn Iterator<Item = &mut ToggleRecord> + '_> = match section {
            CatalogSection::Classified => Box::new(self.classified.iter_mut()),
            CatalogSection::Functional => {
                Box::new(self.functional.iter_mut().flat_map(|g| g.records.iter_mut()))
            }
            CatalogSection::External => {
                Box::new(self.external.iter_mut().flat_map(|g| g.records.iter_mut()))
            }
        };
        for record in records.filter(|record| record.type_name == type_name) {
            record.can_build = can_build;
            updated += 1;
        }
        updated
    }
}

fn grouped(
    section: CatalogSection,
    groups: &[ToggleGroup],
) -> impl Iterator<Item = (CatalogSection, &str, &ToggleRecord)> {
    groups.iter().flat_map(move |group| {
        group
            .records
            .iter()
            .map(move |record| (section, group.group_key.as_str(), record))
    })
}
