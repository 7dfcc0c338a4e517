#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub const LEGACY_FILE: &str = "META-INF/spring-configuration-metadata.json";
pub const MODERN_FILE: &str = "spring-cloud-azure-4.0-configuration-metadata.json";

// Writes `doc` to `root/rel`, creating intermediate directories.
pub fn write_doc(root: &Path, rel: &str, doc: &Value) -> Result<PathBuf> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing fixture {}", path.display()))?;
    Ok(path)
}

/// One group of type `group_type` holding `ids`, each with a string type.
pub fn metadata_doc(group: &str, group_type: &str, ids: &[&str]) -> Value {
    let properties: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "name": id,
                "type": "java.lang.String",
                "sourceType": group_type,
                "description": format!("Property {id}."),
            })
        })
        .collect();
    json!({
        "groups": [{"name": group, "type": group_type, "sourceType": group_type}],
        "properties": properties,
        "hints": []
    })
}

pub fn read_json(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn property_names(doc: &Value) -> Vec<String> {
    doc["properties"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
