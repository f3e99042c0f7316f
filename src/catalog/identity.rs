use std::fmt;

/// Fixed classification of structural (non-functional) blocks.
///
/// Classified catalog records carry the variant name as their type; records
/// whose type does not parse are ignored when toggles are applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum StaticCategory {
    LightArmor,
    HeavyArmor,
    Beams,
    InteriorBlocks,
    CoverBlocks,
    NeonTubes,
    Shelves,
    StaticWheels,
    SubgridHeads,
    BlastDoors,
    SteelCatwalks,
    Passage,
    WindowsNonglass,
    WindowsGlass,
    Stairs,
    Railings,
    GratedCatwalk,
    Conveyors,
    LetterNumberBlocks,
    DeadEngineers,
}

impl StaticCategory {
    /// Every category in declaration order.
    pub const ALL: [StaticCategory; 20] = [
        StaticCategory::LightArmor,
        StaticCategory::HeavyArmor,
        StaticCategory::Beams,
        StaticCategory::InteriorBlocks,
        StaticCategory::CoverBlocks,
        StaticCategory::NeonTubes,
        StaticCategory::Shelves,
        StaticCategory::StaticWheels,
        StaticCategory::SubgridHeads,
        StaticCategory::BlastDoors,
        StaticCategory::SteelCatwalks,
        StaticCategory::Passage,
        StaticCategory::WindowsNonglass,
        StaticCategory::WindowsGlass,
        StaticCategory::Stairs,
        StaticCategory::Railings,
        StaticCategory::GratedCatwalk,
        StaticCategory::Conveyors,
        StaticCategory::LetterNumberBlocks,
        StaticCategory::DeadEngineers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaticCategory::LightArmor => "LightArmor",
            StaticCategory::HeavyArmor => "HeavyArmor",
            StaticCategory::Beams => "Beams",
            StaticCategory::InteriorBlocks => "InteriorBlocks",
            StaticCategory::CoverBlocks => "CoverBlocks",
            StaticCategory::NeonTubes => "NeonTubes",
            StaticCategory::Shelves => "Shelves",
            StaticCategory::StaticWheels => "StaticWheels",
            StaticCategory::SubgridHeads => "SubgridHeads",
            StaticCategory::BlastDoors => "BlastDoors",
            StaticCategory::SteelCatwalks => "SteelCatwalks",
            StaticCategory::Passage => "Passage",
            StaticCategory::WindowsNonglass => "WindowsNonglass",
            StaticCategory::WindowsGlass => "WindowsGlass",
            StaticCategory::Stairs => "Stairs",
            StaticCategory::Railings => "Railings",
            StaticCategory::GratedCatwalk => "GratedCatwalk",
            StaticCategory::Conveyors => "Conveyors",
            StaticCategory::LetterNumberBlocks => "LetterNumberBlocks",
            StaticCategory::DeadEngineers => "DeadEngineers",
        }
    }

    /// Case-sensitive parse of a category name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == value)
    }
}

impl fmt::Display for StaticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three independent collections of a toggle catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CatalogSection {
    /// Fixed structural categories, one record per `StaticCategory`.
    Classified,
    /// Built-in functional blocks grouped by definition type id.
    Functional,
    /// Mod-provided functional blocks grouped by mod id.
    External,
}

impl CatalogSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogSection::Classified => "classified",
            CatalogSection::Functional => "functional",
            CatalogSection::External => "external",
        }
    }
}

impl fmt::Display for CatalogSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
