// Integration suite for block-toggles: catalog building, persistence and
// channel round-trips, and the toggle pass against a sample registry.
mod support;

use anyhow::Result;
use block_toggles::{
    BlockRegistry, CatalogSection, CatalogSource, CatalogStore, CubeSize, FsWorldStorage,
    MemoryVariables, Role, SharedVariables, StaticCategory, StoreSettings, ToggleCatalog,
    ToggleRecord, WorldStorage, apply_catalog, build_catalog, load_world,
    store::{decode_channel, decode_document, encode_channel, encode_document},
};
use serde_json::json;
use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;
use support::{availability_snapshot, available, definition, sample_registry, structural};
use tempfile::TempDir;

// Ensures an empty registry yields no external groups, every category buildable,
// and only the fixed built-in extras in the functional section. The extras are
// listed unconditionally, so the functional section is never empty.
#[test]
fn empty_registry_yields_only_extras_and_categories() {
    let catalog = build_catalog(&BlockRegistry::new());

    assert!(catalog.external.is_empty());
    let names: Vec<_> = catalog
        .classified
        .iter()
        .map(|record| record.type_name.as_str())
        .collect();
    let expected: Vec<_> = StaticCategory::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(names, expected);
    assert!(catalog.classified.iter().all(|record| record.can_build));

    // Only the hard-coded extras remain in the functional section.
    let keys: Vec<_> = catalog
        .functional
        .iter()
        .map(|group| group.group_key.as_str())
        .collect();
    assert_eq!(
        keys,
        vec![
            "MyObjectBuilder_CargoContainer",
            "MyObjectBuilder_CubeBlock",
            "MyObjectBuilder_Ladder2",
            "MyObjectBuilder_TerminalBlock",
        ]
    );
    assert!(
        catalog
            .functional
            .iter()
            .flat_map(|group| &group.records)
            .all(|record| record.can_build)
    );
}

// Ensures built groups hold unique, sorted types and pass catalog validation.
#[test]
fn build_never_duplicates_types_within_a_group() {
    let catalog = build_catalog(&sample_registry());
    for group in catalog.functional.iter().chain(&catalog.external) {
        let unique: BTreeSet<_> = group.records.iter().map(|r| &r.type_name).collect();
        assert_eq!(unique.len(), group.records.len(), "{}", group.group_key);
        let mut sorted = group.records.clone();
        sorted.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        assert_eq!(sorted, group.records, "{} not sorted", group.group_key);
    }
    block_toggles::CatalogIndex::new(catalog).expect("built catalog satisfies invariants");
}

// Ensures a one-way mirror pair yields a single record named after the target.
#[test]
fn mirrored_definition_emits_one_record() {
    let a = definition("MyObjectBuilder_Door", "ADoor", CubeSize::Large, "A");
    let mut b = definition("MyObjectBuilder_Door", "BDoor", CubeSize::Large, "B");
    b.mirroring = Some("A".to_string());
    let catalog = build_catalog(&BlockRegistry::from_definitions([a, b]));

    let doors = catalog
        .functional
        .iter()
        .find(|group| group.group_key == "MyObjectBuilder_Door")
        .expect("door group");
    assert_eq!(doors.records, vec![ToggleRecord::new("A")]);
}

// Ensures the mirror target names the record even when the mirroring
// definition is scanned first.
#[test]
fn mirror_listed_under_target_regardless_of_id_order() {
    let target = definition("MyObjectBuilder_Door", "ZDoor", CubeSize::Large, "A");
    let mut mirrored = definition("MyObjectBuilder_Door", "ADoor", CubeSize::Large, "B");
    mirrored.mirroring = Some("A".to_string());
    let mut registry = BlockRegistry::from_definitions([target, mirrored]);
    let mut catalog = build_catalog(&registry);

    let doors = catalog
        .functional
        .iter()
        .find(|group| group.group_key == "MyObjectBuilder_Door")
        .expect("door group");
    assert_eq!(doors.records, vec![ToggleRecord::new("A")]);

    catalog.set_can_build(CatalogSection::Functional, "A", false);
    let summary = apply_catalog(&catalog, &mut registry);
    assert_eq!(summary.definitions_cleared, 1);
    assert!(!available(&registry, "MyObjectBuilder_Door", "ZDoor"));
    assert!(available(&registry, "MyObjectBuilder_Door", "ADoor"));
}

// Confirms size variants share a record, the basic assembler is never listed,
// and mod blocks land in the external section keyed by mod id.
#[test]
fn sample_registry_catalog_layout() {
    let catalog = build_catalog(&sample_registry());

    let reactors = catalog
        .functional
        .iter()
        .find(|group| group.group_key == "MyObjectBuilder_Reactor")
        .unwrap();
    assert_eq!(reactors.records, vec![ToggleRecord::new("LargeReactor")]);
    assert!(
        !catalog
            .functional
            .iter()
            .any(|group| group.group_key == "MyObjectBuilder_Assembler")
    );
    assert_eq!(catalog.external.len(), 1);
    assert_eq!(catalog.external[0].group_key, "2345678.sbm");
    assert_eq!(catalog.external[0].records, vec![ToggleRecord::new("ModTurret")]);
}

// Ensures a built catalog survives both encodings and a trip through world storage.
#[test]
fn document_and_channel_round_trip_built_catalog() -> Result<()> {
    let catalog = build_catalog(&sample_registry());
    assert_eq!(decode_document(&encode_document(&catalog)?)?, catalog);
    assert_eq!(decode_channel(&encode_channel(&catalog)?)?, catalog);

    let world = TempDir::new()?;
    let storage = FsWorldStorage::new(world.path());
    storage.write("BlockToggles.json", &encode_document(&catalog)?)?;
    assert_eq!(decode_document(&storage.read("BlockToggles.json")?)?, catalog);
    Ok(())
}

// Ensures disabling the Beams category clears the beam block and nothing else.
#[test]
fn classified_beams_clear_only_beam_definitions() {
    let mut registry = sample_registry();
    let before = availability_snapshot(&registry);
    let catalog = ToggleCatalog {
        classified: vec![ToggleRecord {
            type_name: "Beams".to_string(),
            can_build: false,
        }],
        ..Default::default()
    };

    let summary = apply_catalog(&catalog, &mut registry);
    assert_eq!(summary.definitions_cleared, 1);
    assert!(!available(&registry, "MyObjectBuilder_CubeBlock", "LargeBlockBeamBlock"));

    let after = availability_snapshot(&registry);
    let changed: Vec<_> = before
        .as_array()
        .unwrap()
        .iter()
        .zip(after.as_array().unwrap())
        .filter(|(b, a)| b != a)
        .map(|(_, a)| a[0].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        changed,
        vec!["MyObjectBuilder_CubeBlock/LargeBlockBeamBlock".to_string()]
    );
}

// Ensures a second apply pass clears nothing new and leaves the registry unchanged.
#[test]
fn apply_is_idempotent() {
    let mut registry = sample_registry();
    let mut catalog = build_catalog(&registry);
    catalog.set_can_build(CatalogSection::Functional, "SlideDoorLeft", false);
    catalog.set_can_build(CatalogSection::External, "ModTurret", false);
    catalog.set_can_build(CatalogSection::Classified, "WindowsGlass", false);

    let first = apply_catalog(&catalog, &mut registry);
    let snapshot = availability_snapshot(&registry);
    let second = apply_catalog(&catalog, &mut registry);

    assert_eq!(first.definitions_cleared, 4);
    assert_eq!(second.definitions_cleared, 0);
    assert_eq!(second.disabled_records, first.disabled_records);
    assert_eq!(availability_snapshot(&registry), snapshot);

    assert!(!available(&registry, "MyObjectBuilder_Door", "LargeBlockSlideDoorLeft"));
    assert!(!available(&registry, "MyObjectBuilder_Door", "LargeBlockSlideDoorRight"));
    assert!(!available(&registry, "MyObjectBuilder_LargeGatlingTurret", "ModTurret"));
    assert!(!available(&registry, "MyObjectBuilder_CubeBlock", "LargeWindowSquare"));
    assert!(available(&registry, "MyObjectBuilder_CubeBlock", "HalfWindow"));
    assert!(available(&registry, "MyObjectBuilder_Reactor", "LargeBlockLargeGenerator"));
}

// Ensures a participant with nothing on the channel builds locally without publishing.
#[test]
fn participant_without_channel_value_builds_locally() {
    let world = TempDir::new().unwrap();
    let vars = MemoryVariables::new();
    let mut registry = sample_registry();

    let outcome = load_world(
        &mut registry,
        Arc::new(FsWorldStorage::new(world.path())),
        &vars,
        Role::Participant,
        StoreSettings::default(),
    );

    assert_eq!(outcome.source, CatalogSource::Built);
    assert_eq!(outcome.catalog, build_catalog(&sample_registry()));
    assert_eq!(outcome.applied.definitions_cleared, 0);
    assert!(outcome.pending_write.is_none());
    assert!(vars.get(block_toggles::store::DEFAULT_CHANNEL_KEY).is_none());
}

// Ensures an undecodable channel value degrades to a local build.
#[test]
fn participant_with_corrupt_channel_value_builds_locally() {
    let world = TempDir::new().unwrap();
    let vars = MemoryVariables::new();
    vars.set(
        block_toggles::store::DEFAULT_CHANNEL_KEY,
        "bm90IGEgY2F0YWxvZw==".to_string(),
    );
    let registry = sample_registry();
    let store = CatalogStore::new(
        Arc::new(FsWorldStorage::new(world.path())),
        &vars,
        Role::Participant,
        StoreSettings::default(),
    );
    let outcome = store.load(&registry);
    assert_eq!(outcome.source, CatalogSource::Built);
}

// Confirms the first authority load writes the default document in the background
// and later loads read it back.
#[test]
fn first_authority_load_persists_document_in_background() -> Result<()> {
    let world = TempDir::new()?;
    let vars = MemoryVariables::new();
    let mut registry = sample_registry();

    let outcome = load_world(
        &mut registry,
        Arc::new(FsWorldStorage::new(world.path())),
        &vars,
        Role::Authority,
        StoreSettings::default(),
    );
    assert_eq!(outcome.source, CatalogSource::Built);
    outcome.pending_write.expect("background write").wait()?;

    let text = fs::read_to_string(world.path().join("BlockToggles.json"))?;
    assert_eq!(decode_document(&text)?, outcome.catalog);

    // Second load reads the document back instead of rebuilding.
    let again = load_world(
        &mut registry,
        Arc::new(FsWorldStorage::new(world.path())),
        &vars,
        Role::Authority,
        StoreSettings::default(),
    );
    assert_eq!(again.source, CatalogSource::Document);
    assert!(again.pending_write.is_none());
    assert_eq!(again.catalog, outcome.catalog);
    Ok(())
}

// Confirms an edited world document reaches participants through the channel and
// disables the same definitions on both sides.
#[test]
fn hand_edited_document_disables_blocks_on_every_participant() -> Result<()> {
    let world = TempDir::new()?;
    let settings = StoreSettings {
        document_name: "Toggles.json".to_string(),
        channel_key: "Toggles".to_string(),
    };
    let document = json!({
        "classified": [{"type": "LightArmor", "can_build": false}],
        "functional": [{
            "group_key": "MyObjectBuilder_Reactor",
            "records": [{"type": "LargeReactor", "can_build": false}]
        }]
    });
    fs::write(
        world.path().join("Toggles.json"),
        serde_json::to_string_pretty(&document)?,
    )?;
    let vars = MemoryVariables::new();

    let mut server = sample_registry();
    let served = load_world(
        &mut server,
        Arc::new(FsWorldStorage::new(world.path())),
        &vars,
        Role::Authority,
        settings.clone(),
    );
    assert_eq!(served.source, CatalogSource::Document);
    assert_eq!(served.applied.definitions_cleared, 3);
    assert!(vars.get("Toggles").is_some());

    let client_world = TempDir::new()?;
    let mut client = sample_registry();
    let joined = load_world(
        &mut client,
        Arc::new(FsWorldStorage::new(client_world.path())),
        &vars,
        Role::Participant,
        settings,
    );
    assert_eq!(joined.source, CatalogSource::Channel);
    assert_eq!(availability_snapshot(&client), availability_snapshot(&server));
    assert!(!available(&client, "MyObjectBuilder_Reactor", "SmallBlockLargeGenerator"));
    assert!(!available(&client, "MyObjectBuilder_CubeBlock", "LargeBlockArmorBlock"));
    assert!(fs::read_dir(client_world.path())?.next().is_none());
    Ok(())
}

// Ensures category matching ignores mod blocks that reuse a vanilla description.
#[test]
fn mod_blocks_are_never_matched_by_categories() {
    let mut modded = structural("ModBeam", "Description_BeamBlock");
    modded.provenance = block_toggles::Provenance::Mod("99.sbm".to_string());
    let mut registry = BlockRegistry::from_definitions([modded]);
    let catalog = ToggleCatalog {
        classified: vec![ToggleRecord {
            type_name: "Beams".to_string(),
            can_build: false,
        }],
        ..Default::default()
    };
    let summary = apply_catalog(&catalog, &mut registry);
    assert_eq!(summary.definitions_cleared, 0);
    assert!(available(&registry, "MyObjectBuilder_CubeBlock", "ModBeam"));
}
