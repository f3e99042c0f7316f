//! JSON Schema loading for the persisted catalog document.
//!
//! The canonical schema ships inside the crate so world storage never needs
//! a repository checkout. Validation errors are joined into one message so a
//! malformed document reports every violation at once.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

/// Schema for `ToggleCatalog` documents.
pub const CANONICAL_CATALOG_SCHEMA: &str = include_str!("../schema/toggle_catalog.schema.json");

/// Compiled catalog schema.
pub struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    /// Compile the schema embedded in the crate.
    pub fn canonical() -> Result<Self> {
        let raw: Value = serde_json::from_str(CANONICAL_CATALOG_SCHEMA)
            .context("parsing embedded catalog schema")?;
        let compiled = JSONSchema::compile(&raw)
            .map_err(|err| anyhow!("compiling embedded catalog schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// Validate a document, reporting every violation.
    pub fn validate(&self, document: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(document) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("catalog document failed schema validation:\n{details}");
        }
        Ok(())
    }
}
