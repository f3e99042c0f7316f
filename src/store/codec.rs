//! Encodings for the two places a catalog travels.
//!
//! The world document is pretty-printed JSON so operators can edit it by
//! hand; it is checked against the catalog schema and the index invariants
//! on the way in. The channel payload is bincode wrapped in standard base64
//! so it fits a string-valued shared variable.

use crate::catalog::{CatalogIndex, ToggleCatalog};
use crate::error::StoreError;
use crate::schema_loader::CatalogSchema;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

/// Render the catalog as the persisted world document.
pub fn encode_document(catalog: &ToggleCatalog) -> Result<String, StoreError> {
    let mut text = serde_json::to_string_pretty(catalog)?;
    text.push('\n');
    Ok(text)
}

/// Parse and validate a persisted world document.
pub fn decode_document(text: &str) -> Result<ToggleCatalog, StoreError> {
    let value: Value = serde_json::from_str(text)?;
    let schema = CatalogSchema::canonical().map_err(StoreError::Invalid)?;
    schema.validate(&value).map_err(StoreError::Invalid)?;
    let catalog: ToggleCatalog = serde_json::from_value(value)?;
    validated(catalog)
}

/// Encode the catalog for the shared key/value channel.
pub fn encode_channel(catalog: &ToggleCatalog) -> Result<String, StoreError> {
    let bytes = bincode::serialize(catalog)?;
    Ok(STANDARD.encode(bytes))
}

/// Decode and validate a channel payload.
pub fn decode_channel(payload: &str) -> Result<ToggleCatalog, StoreError> {
    let bytes = STANDARD.decode(payload.trim())?;
    let catalog: ToggleCatalog = bincode::deserialize(&bytes)?;
    validated(catalog)
}

fn validated(catalog: ToggleCatalog) -> Result<ToggleCatalog, StoreError> {
    CatalogIndex::new(catalog)
        .map(CatalogIndex::into_catalog)
        .map_err(StoreError::Invalid)
}
