//! Raw configuration documents with deep merge support
//!
//! A [`RawDocument`] is the untrusted input to the engine: a JSON mapping
//! parsed from YAML or JSON. Parsing enforces only structure (the document
//! must be a mapping at its root); everything else is the validator's job.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Untrusted configuration document with deep merge capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDocument(pub JsonValue);

impl RawDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self(JsonValue::Object(serde_json::Map::new()))
    }

    /// Load a document from a file, choosing the parser by extension
    /// (`.json` parses as JSON, anything else as YAML).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: JsonValue = serde_yaml::from_str(yaml)
            .map_err(|e| CoreError::structural(format!("not valid YAML: {e}")))?;
        Self::from_value(value)
    }

    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)
            .map_err(|e| CoreError::structural(format!("not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed value, enforcing that the root is a mapping.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        if !value.is_object() {
            return Err(CoreError::structural(
                "the configuration document must be a mapping at its root",
            ));
        }
        Ok(Self(value))
    }

    /// Deep merge another document into this one.
    ///
    /// Rules:
    /// - Scalars: overlay replaces base
    /// - Objects: recursive merge
    /// - Arrays: overlay replaces base (not appended)
    pub fn merge(&mut self, overlay: &RawDocument) {
        deep_merge(&mut self.0, &overlay.0);
    }

    /// Set a value by dotted path (e.g. `network.pod_cidr`).
    pub fn set(&mut self, path: &str, value: JsonValue) {
        let parts: Vec<&str> = path.split('.').collect();
        set_nested(&mut self.0, &parts, value);
    }

    /// Get a value by dotted path.
    pub fn get(&self, path: &str) -> Option<&JsonValue> {
        let parts: Vec<&str> = path.split('.').collect();
        get_nested(&self.0, &parts)
    }

    /// The inner JSON value.
    pub fn inner(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}

impl Default for RawDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep merge two JSON values.
pub(crate) fn deep_merge(base: &mut JsonValue, overlay: &JsonValue) {
    match (base, overlay) {
        (JsonValue::Object(base_map), JsonValue::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}

fn set_nested(value: &mut JsonValue, path: &[&str], new_value: JsonValue) {
    if path.is_empty() {
        *value = new_value;
        return;
    }

    let key = path[0];
    let remaining = &path[1..];

    if !value.is_object() {
        *value = JsonValue::Object(serde_json::Map::new());
    }

    // SAFETY: we just ensured it's an object above
    let map = value
        .as_object_mut()
        .expect("value should be an object after initialization");

    if remaining.is_empty() {
        map.insert(key.to_string(), new_value);
    } else {
        let entry = map
            .entry(key.to_string())
            .or_insert_with(|| JsonValue::Object(serde_json::Map::new()));
        set_nested(entry, remaining, new_value);
    }
}

fn get_nested<'a>(value: &'a JsonValue, path: &[&str]) -> Option<&'a JsonValue> {
    if path.is_empty() {
        return Some(value);
    }

    match value {
        JsonValue::Object(map) => map
            .get(path[0])
            .and_then(|v| get_nested(v, &path[1..])),
        _ => None,
    }
}

/// Parse `--set` overrides (key=value format, dotted keys).
pub fn parse_set_overrides(set_args: &[String]) -> Result<RawDocument> {
    let mut doc = RawDocument::new();

    for arg in set_args {
        let (key, val) = arg.split_once('=').ok_or_else(|| {
            CoreError::structural(format!("Invalid --set format: '{arg}'. Expected key=value"))
        })?;

        // Try to parse as JSON, fall back to string
        let json_value = if val == "true" {
            JsonValue::Bool(true)
        } else if val == "false" {
            JsonValue::Bool(false)
        } else if val == "null" {
            JsonValue::Null
        } else if let Ok(num) = val.parse::<i64>() {
            JsonValue::Number(num.into())
        } else if val.starts_with('[') || val.starts_with('{') {
            serde_json::from_str(val).unwrap_or(JsonValue::String(val.to_string()))
        } else {
            JsonValue::String(val.to_string())
        };

        doc.set(key, json_value);
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_mapping() {
        let doc = RawDocument::from_yaml("name: aks-1\nlocation: westeurope\n").unwrap();
        assert_eq!(doc.get("name").unwrap(), "aks-1");
    }

    #[test]
    fn rejects_non_mapping_root() {
        assert!(RawDocument::from_yaml("- just\n- a\n- list\n").is_err());
        assert!(RawDocument::from_yaml("42").is_err());
        assert!(RawDocument::from_json("\"scalar\"").is_err());
    }

    #[test]
    fn rejects_unparseable_input() {
        let err = RawDocument::from_yaml("{unbalanced: [").unwrap_err();
        assert!(matches!(err, CoreError::Structural { .. }));
    }

    #[test]
    fn deep_merge_overlays_scalars_and_recurses_objects() {
        let mut base = RawDocument::from_yaml(
            r#"
network:
  pod_cidr: 10.0.0.0/16
  network_policy: azure
name: aks-1
"#,
        )
        .unwrap();

        let overlay = RawDocument::from_yaml(
            r#"
network:
  network_policy: cilium
  service_cidr: 10.1.0.0/16
"#,
        )
        .unwrap();

        base.merge(&overlay);

        assert_eq!(base.get("network.pod_cidr").unwrap(), "10.0.0.0/16");
        assert_eq!(base.get("network.network_policy").unwrap(), "cilium");
        assert_eq!(base.get("network.service_cidr").unwrap(), "10.1.0.0/16");
        assert_eq!(base.get("name").unwrap(), "aks-1");
    }

    #[test]
    fn set_creates_nested_paths() {
        let mut doc = RawDocument::new();
        doc.set("network.pod_cidr", JsonValue::String("10.0.0.0/16".into()));
        doc.set("name", JsonValue::String("aks-1".into()));

        assert_eq!(doc.get("network.pod_cidr").unwrap(), "10.0.0.0/16");
        assert_eq!(doc.get("name").unwrap(), "aks-1");
    }

    #[test]
    fn from_file_picks_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("cluster.yaml");
        std::fs::write(&yaml_path, "name: aks-1\n").unwrap();
        let doc = RawDocument::from_file(&yaml_path).unwrap();
        assert_eq!(doc.get("name").unwrap(), "aks-1");

        let json_path = dir.path().join("cluster.json");
        std::fs::write(&json_path, r#"{"name": "aks-2"}"#).unwrap();
        let doc = RawDocument::from_file(&json_path).unwrap();
        assert_eq!(doc.get("name").unwrap(), "aks-2");
    }

    #[test]
    fn parse_set_overrides_types() {
        let args = vec![
            "node_pools.a.min_count=2".to_string(),
            "lock.kind=ReadOnly".to_string(),
            "identity.system_assigned=true".to_string(),
            "kubernetes_version=null".to_string(),
        ];

        let doc = parse_set_overrides(&args).unwrap();

        assert_eq!(doc.get("node_pools.a.min_count").unwrap(), 2);
        assert_eq!(doc.get("lock.kind").unwrap(), "ReadOnly");
        assert_eq!(doc.get("identity.system_assigned").unwrap(), true);
        assert!(doc.get("kubernetes_version").unwrap().is_null());
    }
}
