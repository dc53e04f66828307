use crate::{
    dependency::Dependency,
    encoding::{JsonDictionary, JsonEncodable},
    path::{expand_paths, PathContainer, PathProperty},
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Spec document (top-level): an optional name, the declared dependencies,
/// and every other key kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecDocument {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,

    #[serde(flatten)]
    pub extras: HashMap<String, Value>,
}

// A `name` that is not a string reads as absent.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        other => {
            debug!("Ignoring non-string spec name: {}", other);
            Ok(None)
        }
    }
}

impl SpecDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(text).context("Invalid spec JSON")?;
        debug!("Decoded {} dependencies", spec.dependencies.len());
        Ok(spec)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let spec: Self = toml::from_str(text).context("Invalid spec TOML")?;
        debug!("Decoded {} dependencies", spec.dependencies.len());
        Ok(spec)
    }

    /// Reads a `.json` or `.toml` spec, expanding framework paths relative to
    /// the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading spec: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read spec: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let mut value: Value = match extension.as_deref() {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("Invalid spec JSON: {}", path.display()))?,
            Some("toml") => toml::from_str(&text)
                .with_context(|| format!("Invalid spec TOML: {}", path.display()))?,
            _ => bail!("Unsupported spec format: {}", path.display()),
        };

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        if let Value::Object(root) = &mut value {
            let properties = [PathProperty::Object(
                "dependencies",
                Dependency::path_properties(),
            )];
            expand_paths(root, &properties, base_dir);
        }

        let spec: Self = serde_json::from_value(value)
            .with_context(|| format!("Invalid spec: {}", path.display()))?;
        info!(
            "Loaded spec {} with {} dependencies",
            path.display(),
            spec.dependencies.len()
        );
        Ok(spec)
    }

    /// Dependencies with duplicate references dropped, keeping the first
    /// declaration. Flags of the dropped entries are not merged.
    pub fn unique_dependencies(&self) -> Vec<&Dependency> {
        let mut seen = HashSet::new();
        self.dependencies
            .iter()
            .filter(|dependency| seen.insert(*dependency))
            .collect()
    }
}

impl JsonEncodable for SpecDocument {
    fn to_json_value(&self) -> Value {
        let mut entries: Vec<(String, Option<Value>)> = vec![
            ("name".to_string(), self.name.clone().map(Value::String)),
            (
                "dependencies".to_string(),
                Some(Value::Array(
                    self.dependencies.iter().map(|d| d.to_json_value()).collect(),
                )),
            ),
        ];
        entries.extend(
            self.extras
                .iter()
                .map(|(key, value)| (key.clone(), Some(value.clone()))),
        );
        let dict: JsonDictionary = self.filter_empty(entries);
        Value::Object(dict)
    }
}
