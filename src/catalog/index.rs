//! Indexed view of a toggle catalog.
//!
//! The index enforces the catalog invariants (non-empty identifiers, unique
//! group keys per section, unique types per group) and provides lookup by
//! section and type. Documents read back from world storage or the shared
//! channel go through here before they are trusted.

use crate::catalog::{CatalogSection, ToggleCatalog, ToggleGroup, ToggleRecord};
use anyhow::{Result, bail};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
/// Catalog plus a derived `(section, type) -> can_build` index.
pub struct CatalogIndex {
    catalog: ToggleCatalog,
    by_type: BTreeMap<(CatalogSection, String), bool>,
}

impl CatalogIndex {
    /// Validate the catalog and build the lookup table.
    pub fn new(catalog: ToggleCatalog) -> Result<Self> {
        let mut by_type = BTreeMap::new();
        index_records(CatalogSection::Classified, "classified", &catalog.classified, &mut by_type)?;
        index_groups(CatalogSection::Functional, &catalog.functional, &mut by_type)?;
        index_groups(CatalogSection::External, &catalog.external, &mut by_type)?;
        Ok(Self { catalog, by_type })
    }

    /// Whether `type_name` may be built, if the section lists it.
    ///
    /// A type listed in several groups of one section is buildable only when
    /// every listing allows it.
    pub fn can_build(&self, section: CatalogSection, type_name: &str) -> Option<bool> {
        self.by_type
            .get(&(section, type_name.to_string()))
            .copied()
    }

    /// Number of records marked as not buildable.
    pub fn disabled_count(&self) -> usize {
        self.catalog.disabled().count()
    }

    pub fn into_catalog(self) -> ToggleCatalog {
        self.catalog
    }
}

fn index_groups(
    section: CatalogSection,
    groups: &[ToggleGroup],
    by_type: &mut BTreeMap<(CatalogSection, String), bool>,
) -> Result<()> {
    let mut keys = BTreeSet::new();
    for group in groups {
        if group.group_key.trim().is_empty() {
            bail!("{section} section contains a group with no key");
        }
        if !keys.insert(group.group_key.as_str()) {
            bail!("duplicate {section} group '{}'", group.group_key);
        }
        index_records(section, &group.group_key, &group.records, by_type)?;
    }
    Ok(())
}

fn index_records(
    section: CatalogSection,
    scope: &str,
    records: &[ToggleRecord],
    by_type: &mut BTreeMap<(CatalogSection, String), bool>,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for record in records {
        if record.type_name.trim().is_empty() {
            bail!("{section} group '{scope}' contains a record with no type");
        }
        if !seen.insert(record.type_name.as_str()) {
            bail!(
                "duplicate type '{}' in {section} group '{scope}'",
                record.type_name
            );
        }
        by_type
            .entry((section, record.type_name.clone()))
            .and_modify(|allowed| *allowed &= record.can_build)
            .or_insert(record.can_build);
    }
    Ok(())
}
