use block_toggles::{BlockDefinition, BlockRegistry, CubeSize, DefinitionId, Provenance};
use serde_json::{Value, json};

pub fn definition(type_id: &str, subtype: &str, size: CubeSize, pair: &str) -> BlockDefinition {
    BlockDefinition {
        id: DefinitionId::new(type_id, subtype),
        size,
        public: true,
        functional: true,
        pair_name: pair.to_string(),
        mirroring: None,
        description: None,
        provenance: Provenance::BaseGame,
        available_in_survival: true,
    }
}

pub fn structural(subtype: &str, description: &str) -> BlockDefinition {
    BlockDefinition {
        functional: false,
        description: Some(description.to_string()),
        ..definition("MyObjectBuilder_CubeBlock", subtype, CubeSize::Large, subtype)
    }
}

/// A small world: paired reactors, a mirrored door pair, a mod turret, and
/// a few structural blocks.
pub fn sample_definitions() -> Vec<BlockDefinition> {
    let mut door_left = definition(
        "MyObjectBuilder_Door",
        "LargeBlockSlideDoorLeft",
        CubeSize::Large,
        "SlideDoorLeft",
    );
    door_left.mirroring = Some("SlideDoorRight".to_string());
    let mut door_right = definition(
        "MyObjectBuilder_Door",
        "LargeBlockSlideDoorRight",
        CubeSize::Large,
        "SlideDoorRight",
    );
    door_right.mirroring = Some("SlideDoorLeft".to_string());
    let mut turret = definition(
        "MyObjectBuilder_LargeGatlingTurret",
        "ModTurret",
        CubeSize::Large,
        "ModTurret",
    );
    turret.provenance = Provenance::Mod("2345678.sbm".to_string());

    vec![
        definition(
            "MyObjectBuilder_Reactor",
            "LargeBlockLargeGenerator",
            CubeSize::Large,
            "LargeReactor",
        ),
        definition(
            "MyObjectBuilder_Reactor",
            "SmallBlockLargeGenerator",
            CubeSize::Small,
            "LargeReactor",
        ),
        definition(
            "MyObjectBuilder_Assembler",
            "BasicAssembler",
            CubeSize::Large,
            "BasicAssembler",
        ),
        door_left,
        door_right,
        turret,
        structural("LargeBlockBeamBlock", "Description_BeamBlock"),
        structural("LargeBlockArmorBlock", "Description_LightArmor"),
        structural("LargeWindowSquare", "Description_Window"),
        structural("HalfWindow", "Description_Window"),
    ]
}

pub fn sample_registry() -> BlockRegistry {
    BlockRegistry::from_definitions(sample_definitions())
}

pub fn available(registry: &BlockRegistry, type_id: &str, subtype: &str) -> bool {
    use block_toggles::DefinitionRegistry;
    registry
        .definition(&DefinitionId::new(type_id, subtype))
        .map(|definition| definition.available_in_survival)
        .unwrap_or_else(|| panic!("no definition {type_id}/{subtype}"))
}

pub fn availability_snapshot(registry: &BlockRegistry) -> Value {
    use block_toggles::DefinitionRegistry;
    let entries: Vec<Value> = registry
        .definitions()
        .map(|definition| json!([definition.id.to_string(), definition.available_in_survival]))
        .collect();
    Value::Array(entries)
}
