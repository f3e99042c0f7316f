//! Host registry of block definitions.
//!
//! The game host owns the live definition tables; this module describes the
//! slice of them the toggles need (enumeration, lookup by id and by pairing
//! identity, and a single mutable availability flag). `DefinitionRegistry` is
//! the seam hosts implement; `BlockRegistry` is the in-memory implementation
//! used by the harness binary and the tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fully-qualified definition identifier (`type_id/subtype`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct DefinitionId {
    pub type_id: String,
    pub subtype: String,
}

impl DefinitionId {
    pub fn new(type_id: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            subtype: subtype.into(),
        }
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_id, self.subtype)
    }
}

/// Where a definition was loaded from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    BaseGame,
    Mod(String),
}

impl Provenance {
    pub fn is_base_game(&self) -> bool {
        matches!(self, Provenance::BaseGame)
    }
}

/// Physical grid size of a definition; a pairing group exposes at most one of each.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeSize {
    Large,
    Small,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One block definition as exposed by the host.
///
/// `functional` marks definitions carrying a behaviour component (functional
/// blocks and warheads); only those are discovered by the catalog builder.
/// `description` is the descriptive tag the category table matches against.
pub struct BlockDefinition {
    pub id: DefinitionId,
    pub size: CubeSize,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub functional: bool,
    pub pair_name: String,
    #[serde(default)]
    pub mirroring: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub provenance: Provenance,
    #[serde(default = "default_true")]
    pub available_in_survival: bool,
}

fn default_true() -> bool {
    true
}

impl BlockDefinition {
    /// Mirror pairing identity, ignoring empty strings the host may report.
    pub fn mirror_name(&self) -> Option<&str> {
        self.mirroring.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Definitions sharing one pairing identity, one slot per grid size.
pub struct DefinitionGroup {
    pub pair_name: String,
    pub large: Option<DefinitionId>,
    pub small: Option<DefinitionId>,
}

impl DefinitionGroup {
    /// Representative member: the large variant when present, else the small one.
    pub fn any(&self) -> Option<&DefinitionId> {
        self.large.as_ref().or(self.small.as_ref())
    }

    /// Every physical variant the group exposes.
    pub fn variants(&self) -> impl Iterator<Item = &DefinitionId> {
        self.large.iter().chain(self.small.iter())
    }
}

/// Read/mutate access to the host's definition tables.
pub trait DefinitionRegistry {
    /// Enumerate every definition known to the host.
    fn definitions(&self) -> Box<dyn Iterator<Item = &BlockDefinition> + '_>;

    /// Look up a definition by identifier.
    fn definition(&self, id: &DefinitionId) -> Option<&BlockDefinition>;

    /// Resolve the group registered under a pairing identity.
    fn group(&self, pair_name: &str) -> Option<DefinitionGroup>;

    /// Set the survival availability flag; returns true when the flag changed.
    fn set_available_in_survival(&mut self, id: &DefinitionId, available: bool) -> bool;
}

#[derive(Debug, Default)]
/// In-memory registry keyed by definition id.
pub struct BlockRegistry {
    definitions: BTreeMap<DefinitionId, BlockDefinition>,
    groups: BTreeMap<String, DefinitionGroup>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of definitions, registering them in order.
    pub fn from_definitions(definitions: impl IntoIterator<Item = BlockDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Register a definition and slot it into its pairing group.
    ///
    /// A later definition with the same id, or the same pair name and size,
    /// replaces the earlier one. Re-registering an id under another pair or
    /// size vacates its old slot.
    pub fn register(&mut self, definition: BlockDefinition) {
        if let Some(previous) = self.definitions.get(&definition.id) {
            if previous.pair_name != definition.pair_name || previous.size != definition.size {
                let (pair_name, size) = (previous.pair_name.clone(), previous.size);
                self.vacate_slot(&pair_name, size, &definition.id);
            }
        }
        let group = self
            .groups
            .entry(definition.pair_name.clone())
            .or_insert_with(|| DefinitionGroup {
                pair_name: definition.pair_name.clone(),
                ..Default::default()
            });
        let slot = match definition.size {
            CubeSize::Large => &mut group.large,
            CubeSize::Small => &mut group.small,
        };
        if let Some(previous) = slot.replace(definition.id.clone()) {
            if previous != definition.id {
                log::debug!(
                    "pair '{}' {:?} slot: {} replaced by {}",
                    definition.pair_name,
                    definition.size,
                    previous,
                    definition.id
                );
            }
        }
        self.definitions.insert(definition.id.clone(), definition);
    }

    fn vacate_slot(&mut self, pair_name: &str, size: CubeSize, id: &DefinitionId) {
        let Some(group) = self.groups.get_mut(pair_name) else {
            return;
        };
        let slot = match size {
            CubeSize::Large => &mut group.large,
            CubeSize::Small => &mut group.small,
        };
        if slot.as_ref() == Some(id) {
            *slot = None;
            log::debug!("pair '{pair_name}' {size:?} slot: {id} moved elsewhere");
        }
        if group.large.is_none() && group.small.is_none() {
            self.groups.remove(pair_name);
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl DefinitionRegistry for BlockRegistry {
    fn definitions(&self) -> Box<dyn Iterator<Item = &BlockDefinition> + '_> {
        Box::new(self.definitions.values())
    }

    fn definition(&self, id: &DefinitionId) -> Option<&BlockDefinition> {
        self.definitions.get(id)
    }

    fn group(&self, pair_name: &str) -> Option<DefinitionGroup> {
        self.groups.get(pair_name).cloned()
    }

    fn set_available_in_survival(&mut self, id: &DefinitionId, available: bool) -> bool {
        match self.definitions.get_mut(id) {
            Some(definition) if definition.available_in_survival != available => {
                definition.available_in_survival = available;
                true
            }
            _ => false,
        }
    }
}
