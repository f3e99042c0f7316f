//! Runs one world load against a registry fixture.
//!
//! The helper stands in for a game host: it loads block definitions from a
//! JSON file, resolves the catalog for the requested role using a world
//! directory and a shared-variables file, applies it, and prints every
//! definition that ended up unavailable in survival.

use anyhow::{Context, Result, bail};
use block_toggles::{
    BlockDefinition, BlockRegistry, CatalogIndex, CatalogSection, DefinitionRegistry,
    FsWorldStorage, MemoryVariables, Role, StaticCategory, StoreSettings, load_world,
};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const LOG_ENV: &str = "BLOCK_TOGGLES_LOG";

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "info"))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let mut registry = load_registry(&cli.registry)?;
    let variables = match &cli.variables {
        Some(path) if path.is_file() => load_variables(path)?,
        _ => MemoryVariables::new(),
    };

    let storage = Arc::new(FsWorldStorage::new(&cli.world));
    let outcome = load_world(
        &mut registry,
        storage.clone(),
        &variables,
        cli.role,
        StoreSettings::default(),
    );

    if let Some(pending) = outcome.pending_write {
        // The helper exits right after the load, so it waits where a host would not.
        pending.wait().with_context(|| {
            format!("writing catalog document under {}", storage.root().display())
        })?;
    }

    if cli.role == Role::Authority {
        if let Some(path) = &cli.variables {
            let rendered = serde_json::to_string_pretty(&variables.to_json())?;
            fs::write(path, rendered + "\n")
                .with_context(|| format!("writing shared variables {}", path.display()))?;
        }
    }

    let index = CatalogIndex::new(outcome.catalog).context("resolved catalog is invalid")?;
    println!(
        "catalog source: {:?}; disabled records: {}; definitions cleared: {}",
        outcome.source,
        index.disabled_count(),
        outcome.applied.definitions_cleared
    );
    for category in StaticCategory::ALL {
        if index.can_build(CatalogSection::Classified, category.as_str()) == Some(false) {
            println!("disabled category: {category}");
        }
    }
    for definition in registry.definitions() {
        if !definition.available_in_survival {
            println!("unavailable: {}", definition.id);
        }
    }
    Ok(())
}

fn load_registry(path: &Path) -> Result<BlockRegistry> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading registry {}", path.display()))?;
    let definitions: Vec<BlockDefinition> = serde_json::from_str(&text)
        .with_context(|| format!("parsing registry {}", path.display()))?;
    let registry = BlockRegistry::from_definitions(definitions);
    if registry.is_empty() {
        log::warn!("registry {} holds no definitions", path.display());
    } else {
        log::info!("registry {}: {} definition(s)", path.display(), registry.len());
    }
    Ok(registry)
}

fn load_variables(path: &Path) -> Result<MemoryVariables> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading shared variables {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing shared variables {}", path.display()))?;
    MemoryVariables::from_json(&value)
}

struct Cli {
    registry: PathBuf,
    world: PathBuf,
    role: Role,
    variables: Option<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();

        let mut registry = None;
        let mut world = None;
        let mut role = Role::Authority;
        let mut variables = None;

        while let Some(flag) = args.next() {
            let flag_str = flag
                .to_str()
                .with_context(|| "Invalid UTF-8 in command flag")?;
            match flag_str {
                "--registry" => registry = Some(PathBuf::from(next_value(&mut args, flag_str)?)),
                "--world" => world = Some(PathBuf::from(next_value(&mut args, flag_str)?)),
                "--variables" => variables = Some(PathBuf::from(next_value(&mut args, flag_str)?)),
                "--role" => {
                    let value = next_value(&mut args, flag_str)?;
                    role = match value.to_str() {
                        Some("authority") => Role::Authority,
                        Some("participant") => Role::Participant,
                        _ => bail!("--role expects 'authority' or 'participant'"),
                    };
                }
                "--help" | "-h" => usage(0),
                other => bail!("Unknown argument: {other}"),
            }
        }

        let Some(registry) = registry else {
            usage(1);
        };
        let Some(world) = world else {
            usage(1);
        };
        Ok(Self {
            registry,
            world,
            role,
            variables,
        })
    }
}

fn next_value(args: &mut env::ArgsOs, flag: &str) -> Result<std::ffi::OsString> {
    args.next()
        .with_context(|| format!("{flag} expects a value"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: toggle-session --registry <definitions.json> --world <dir> [--role authority|participant] [--variables <vars.json>]\n\nOptions:\n  --registry    JSON array of block definitions standing in for the host registry.\n  --world       World directory holding BlockToggles.json.\n  --role        Participant role for this load (default: authority).\n  --variables   Shared variables file; read on start, rewritten by the authority.\n\nLogging is controlled by BLOCK_TOGGLES_LOG (default: info)."
    );
    std::process::exit(code);
}
