//! Declarative mapping from `StaticCategory` to description matchers.
//!
//! Structural blocks carry no pairing group worth toggling one by one, so a
//! disabled category is resolved by matching each definition's descriptive
//! tag against the reference tags below. Only base-game definitions are ever
//! matched; mod blocks reusing a vanilla description stay untouched.

use crate::catalog::StaticCategory;
use crate::registry::BlockDefinition;
use DescriptionMatcher::{Exact, Prefix, Subtype};

/// One way a definition can belong to a category.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DescriptionMatcher {
    /// Description equals the tag.
    Exact(&'static str),
    /// Description starts with the tag.
    Prefix(&'static str),
    /// Description equals `tag`, and the subtype starts with one of
    /// `prefixes` (`include`) or with none of them (`!include`).
    Subtype {
        tag: &'static str,
        prefixes: &'static [&'static str],
        include: bool,
    },
}

impl DescriptionMatcher {
    pub fn matches(&self, definition: &BlockDefinition) -> bool {
        let Some(description) = definition.description.as_deref() else {
            return false;
        };
        match self {
            DescriptionMatcher::Exact(tag) => description == *tag,
            DescriptionMatcher::Prefix(tag) => description.starts_with(*tag),
            DescriptionMatcher::Subtype {
                tag,
                prefixes,
                include,
            } => {
                description == *tag
                    && prefixes
                        .iter()
                        .any(|prefix| definition.id.subtype.starts_with(*prefix))
                        == *include
            }
        }
    }
}

const WINDOW: &str = "Description_Window";
const FRAMED_WINDOW_SUBTYPES: &[&str] = &["Half", "Bridge"];

struct CategoryRule {
    category: StaticCategory,
    matchers: &'static [DescriptionMatcher],
}

const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: StaticCategory::LightArmor,
        matchers: &[Exact("Description_LightArmor")],
    },
    CategoryRule {
        category: StaticCategory::HeavyArmor,
        matchers: &[Exact("Description_HeavyArmor")],
    },
    CategoryRule {
        category: StaticCategory::Beams,
        matchers: &[Exact("Description_BeamBlock")],
    },
    CategoryRule {
        category: StaticCategory::InteriorBlocks,
        matchers: &[
            Exact("Description_InteriorPillar"),
            Exact("Description_InteriorWall"),
        ],
    },
    CategoryRule {
        category: StaticCategory::CoverBlocks,
        matchers: &[
            Exact("Description_FullCoverWall"),
            Exact("Description_FireCover"),
            Exact("Description_Embrasure"),
        ],
    },
    CategoryRule {
        category: StaticCategory::NeonTubes,
        matchers: &[Exact("Description_NeonTubes")],
    },
    CategoryRule {
        category: StaticCategory::Shelves,
        matchers: &[Exact("Description_StorageShelf")],
    },
    CategoryRule {
        category: StaticCategory::StaticWheels,
        matchers: &[Exact("Description_Wheel")],
    },
    CategoryRule {
        category: StaticCategory::SubgridHeads,
        matchers: &[
            Exact("Description_AdvancedRotorPart"),
            Exact("Description_RotorPart"),
            Exact("Description_PistonTop"),
            Exact("Description_HingeHead"),
        ],
    },
    CategoryRule {
        category: StaticCategory::BlastDoors,
        matchers: &[Exact("Description_BlastDoor")],
    },
    CategoryRule {
        category: StaticCategory::SteelCatwalks,
        matchers: &[Exact("Description_SteelCatwalk")],
    },
    CategoryRule {
        category: StaticCategory::Passage,
        matchers: &[Exact("Description_Passage")],
    },
    CategoryRule {
        category: StaticCategory::WindowsNonglass,
        matchers: &[
            Subtype {
                tag: WINDOW,
                prefixes: FRAMED_WINDOW_SUBTYPES,
                include: true,
            },
            Exact("Description_BarredWindow"),
            Exact("Description_ViewPort"),
            Exact("Description_VerticalWindow"),
            Exact("Description_DiagonalWindow"),
            Exact("Description_WindowWall"),
            Exact("Description_WindowWallLeft"),
            Exact("Description_WindowWallRight"),
        ],
    },
    CategoryRule {
        category: StaticCategory::WindowsGlass,
        matchers: &[Subtype {
            tag: WINDOW,
            prefixes: FRAMED_WINDOW_SUBTYPES,
            include: false,
        }],
    },
    CategoryRule {
        category: StaticCategory::Stairs,
        matchers: &[
            Exact("Description_GratedStairs"),
            Exact("Description_GratedHalfStairs"),
            Exact("Description_Stairs"),
            Exact("Description_Ramp"),
        ],
    },
    CategoryRule {
        category: StaticCategory::Railings,
        matchers: &[Prefix("Description_Railing")],
    },
    CategoryRule {
        category: StaticCategory::GratedCatwalk,
        matchers: &[Prefix("Description_GratedCatwalk")],
    },
    CategoryRule {
        category: StaticCategory::Conveyors,
        matchers: &[Exact("Description_ConveyorTube")],
    },
    CategoryRule {
        category: StaticCategory::LetterNumberBlocks,
        matchers: &[
            Exact("Description_Letters"),
            Exact("Description_Numbers"),
            Exact("Description_Symbols"),
        ],
    },
    CategoryRule {
        category: StaticCategory::DeadEngineers,
        matchers: &[Exact("Description_DeadEngineer")],
    },
];

/// Matchers for a category; empty when the table has no rule for it.
pub fn rules_for(category: StaticCategory) -> &'static [DescriptionMatcher] {
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.category == category)
        .map(|rule| rule.matchers)
        .unwrap_or(&[])
}

/// True when a base-game definition falls into `category`.
pub fn matches_category(category: StaticCategory, definition: &BlockDefinition) -> bool {
    definition.provenance.is_base_game()
        && rules_for(category)
            .iter()
            .any(|matcher| matcher.matches(definition))
}
