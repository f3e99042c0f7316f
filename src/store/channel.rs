//! Shared key/value channel between the authority and other participants.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// String-valued variables visible to every participant of a session.
pub trait SharedVariables {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
}

#[derive(Debug, Default)]
/// In-process variable table.
pub struct MemoryVariables {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load variables from a JSON object of string values.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            bail!("shared variables must be a JSON object");
        };
        let mut values = BTreeMap::new();
        for (key, entry) in object {
            let text = entry
                .as_str()
                .with_context(|| format!("shared variable '{key}' must be a string"))?;
            values.insert(key.clone(), text.to_string());
        }
        Ok(Self {
            values: Mutex::new(values),
        })
    }

    /// Snapshot the variables as a JSON object.
    pub fn to_json(&self) -> Value {
        let values = self.values.lock().unwrap_or_else(|err| err.into_inner());
        Value::Object(
            values
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect(),
        )
    }
}

impl SharedVariables for MemoryVariables {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(|err| err.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut values = self.values.lock().unwrap_or_else(|err| err.into_inner());
        values.insert(key.to_string(), value);
    }
}
