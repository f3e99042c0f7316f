//! Resolves the catalog for one world load.
//!
//! The authority reads the persisted world document (building and writing a
//! default one when it is missing) and publishes the result on the shared
//! channel. Every other participant reads the channel. Any failure along
//! the way degrades to a locally built catalog; `load` never errors.

pub mod channel;
pub mod codec;
pub mod storage;

pub use channel::{MemoryVariables, SharedVariables};
pub use codec::{decode_channel, decode_document, encode_channel, encode_document};
pub use storage::{FsWorldStorage, WorldStorage};

use crate::catalog::{ToggleCatalog, build_catalog};
use crate::error::StoreError;
use crate::registry::DefinitionRegistry;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Default name of the catalog document in world storage.
pub const DEFAULT_DOCUMENT_NAME: &str = "BlockToggles.json";
/// Default shared variable carrying the encoded catalog.
pub const DEFAULT_CHANNEL_KEY: &str = "BlockToggles_Catalog";

#[derive(Clone, Debug, Eq, PartialEq)]
/// Where the catalog lives in storage and on the channel.
pub struct StoreSettings {
    pub document_name: String,
    pub channel_key: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            channel_key: DEFAULT_CHANNEL_KEY.to_string(),
        }
    }
}

/// Which side of the session this participant plays.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Single elected writer (the server).
    Authority,
    /// Any other participant (clients).
    Participant,
}

/// How the resolved catalog was obtained.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CatalogSource {
    /// Read from the persisted world document.
    Document,
    /// Decoded from the shared channel.
    Channel,
    /// Built from the registry because nothing usable was found.
    Built,
}

/// Handle on the background document write.
///
/// Dropping it leaves the write running; the worker logs its own failure.
pub struct PendingWrite {
    outcome: Receiver<Result<(), StoreError>>,
}

impl PendingWrite {
    /// Block until the write finishes.
    pub fn wait(self) -> Result<(), StoreError> {
        self.outcome.recv().unwrap_or(Err(StoreError::WorkerGone))
    }

    /// Non-blocking check; `None` while the write is still running.
    pub fn try_outcome(&self) -> Option<Result<(), StoreError>> {
        match self.outcome.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(StoreError::WorkerGone)),
        }
    }
}

/// Result of `CatalogStore::load`.
pub struct LoadOutcome {
    pub catalog: ToggleCatalog,
    pub source: CatalogSource,
    pub pending_write: Option<PendingWrite>,
}

/// Loads, persists and publishes the catalog for one participant.
pub struct CatalogStore<'a> {
    storage: Arc<dyn WorldStorage>,
    variables: &'a dyn SharedVariables,
    role: Role,
    settings: StoreSettings,
}

impl<'a> CatalogStore<'a> {
    pub fn new(
        storage: Arc<dyn WorldStorage>,
        variables: &'a dyn SharedVariables,
        role: Role,
        settings: StoreSettings,
    ) -> Self {
        Self {
            storage,
            variables,
            role,
            settings,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Resolve the catalog for this world; falls back to a fresh build on
    /// any read or decode failure.
    pub fn load(&self, registry: &dyn DefinitionRegistry) -> LoadOutcome {
        match self.role {
            Role::Authority => self.load_as_authority(registry),
            Role::Participant => self.load_as_participant(registry),
        }
    }

    fn load_as_authority(&self, registry: &dyn DefinitionRegistry) -> LoadOutcome {
        let name = &self.settings.document_name;
        let outcome = if !self.storage.exists(name) {
            log::info!("no catalog document '{name}' in world storage; building defaults");
            let catalog = build_catalog(registry);
            let pending_write = self.spawn_write(&catalog);
            LoadOutcome {
                catalog,
                source: CatalogSource::Built,
                pending_write,
            }
        } else {
            match self.read_document() {
                Ok(catalog) => {
                    log::info!("loaded catalog document '{name}'");
                    LoadOutcome {
                        catalog,
                        source: CatalogSource::Document,
                        pending_write: None,
                    }
                }
                Err(err) => {
                    log::warn!(
                        "catalog document '{name}' unusable ({err}); using defaults and leaving the file untouched"
                    );
                    LoadOutcome {
                        catalog: build_catalog(registry),
                        source: CatalogSource::Built,
                        pending_write: None,
                    }
                }
            }
        };
        self.publish(&outcome.catalog);
        outcome
    }

    fn load_as_participant(&self, registry: &dyn DefinitionRegistry) -> LoadOutcome {
        match self.read_channel() {
            Ok(catalog) => {
                log::info!(
                    "received catalog from shared variable '{}'",
                    self.settings.channel_key
                );
                LoadOutcome {
                    catalog,
                    source: CatalogSource::Channel,
                    pending_write: None,
                }
            }
            Err(err) => {
                log::warn!("shared catalog unavailable ({err}); building locally");
                LoadOutcome {
                    catalog: build_catalog(registry),
                    source: CatalogSource::Built,
                    pending_write: None,
                }
            }
        }
    }

    fn read_document(&self) -> Result<ToggleCatalog, StoreError> {
        let text = self.storage.read(&self.settings.document_name)?;
        decode_document(&text)
    }

    fn read_channel(&self) -> Result<ToggleCatalog, StoreError> {
        let key = &self.settings.channel_key;
        let payload = self
            .variables
            .get(key)
            .ok_or_else(|| StoreError::MissingVariable(key.clone()))?;
        decode_channel(&payload)
    }

    fn publish(&self, catalog: &ToggleCatalog) {
        match encode_channel(catalog) {
            Ok(payload) => {
                log::debug!(
                    "publishing catalog on '{}' ({} bytes)",
                    self.settings.channel_key,
                    payload.len()
                );
                self.variables.set(&self.settings.channel_key, payload);
            }
            Err(err) => log::warn!("failed to encode catalog for the shared channel: {err}"),
        }
    }

    /// Encode and write the document on a worker thread.
    fn spawn_write(&self, catalog: &ToggleCatalog) -> Option<PendingWrite> {
        let text = match encode_document(catalog) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("failed to encode catalog document: {err}");
                return None;
            }
        };
        let storage = Arc::clone(&self.storage);
        let name = self.settings.document_name.clone();
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("catalog-writer".to_string())
            .spawn(move || {
                let outcome = storage.write(&name, &text).map_err(StoreError::from);
                match &outcome {
                    Ok(()) => log::info!("wrote default catalog document '{name}'"),
                    Err(err) => log::warn!("failed to write catalog document '{name}': {err}"),
                }
                let _ = tx.send(outcome);
            });
        match spawned {
            Ok(_) => Some(PendingWrite { outcome: rx }),
            Err(err) => {
                log::warn!("could not start catalog writer: {err}");
                None
            }
        }
    }
}
