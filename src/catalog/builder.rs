//! Builds a `Catalog` from one or more metadata documents.
//!
//! Documents are validated, deserialized and folded into a shared group map.
//! Properties land in the group whose `type` matches their `sourceType` and
//! whose name is the longest prefix of their id; everything else goes to the
//! unnamed root group. Repeated groups across documents are merged and the
//! first definition of a property id wins.

use crate::catalog::model::{Catalog, DefaultValue, Deprecation, DeprecationLevel, Group, Property};
use crate::error::LoadError;
use crate::schema_loader::MetadataSchema;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Name of the group holding properties that match no declared group.
pub const ROOT_GROUP: &str = "";

#[derive(Debug, Deserialize)]
struct MetadataDocument {
    #[serde(default)]
    groups: Vec<RawGroup>,
    #[serde(default)]
    properties: Vec<RawProperty>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(rename = "sourceType", default)]
    source_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "defaultValue", default)]
    default_value: Value,
    #[serde(default)]
    deprecation: Option<RawDeprecation>,
    #[serde(default)]
    deprecated: bool,
}

#[derive(Debug, Deserialize)]
struct RawDeprecation {
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    replacement: Option<String>,
}

impl RawProperty {
    fn into_property(self) -> Property {
        let deprecation = match self.deprecation {
            Some(raw) => Some(Deprecation {
                level: Some(DeprecationLevel::parse_lenient(raw.level.as_deref())),
                reason: raw.reason,
                replacement: raw.replacement,
            }),
            None if self.deprecated => Some(Deprecation {
                level: Some(DeprecationLevel::Warning),
                ..Deprecation::default()
            }),
            None => None,
        };
        Property {
            id: self.name,
            kind: self.kind,
            description: self.description,
            default_value: DefaultValue::from_json(self.default_value),
            deprecation,
            source_type: self.source_type,
        }
    }
}

/// Accumulates metadata documents into a single catalog.
pub struct CatalogBuilder {
    schema: MetadataSchema,
    groups: BTreeMap<String, Group>,
    sources: usize,
}

impl CatalogBuilder {
    /// Empty builder; fails only if the bundled schema does not compile.
    pub fn new() -> Result<Self, LoadError> {
        Ok(Self {
            schema: MetadataSchema::bundled()?,
            groups: BTreeMap::new(),
            sources: 0,
        })
    }

    /// Reads one document fully from `reader` and merges it. `origin` names
    /// the source in errors and logs.
    pub fn with_json_source<R: Read>(mut self, mut reader: R, origin: &str) -> Result<Self, LoadError> {
        let mut buf = String::new();
        reader
            .read_to_string(&mut buf)
            .map_err(|source| LoadError::Read {
                origin: origin.to_string(),
                source,
            })?;
        let value: Value = serde_json::from_str(&buf).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        self.schema.validate(origin, &value)?;
        let document: MetadataDocument =
            serde_json::from_value(value).map_err(|source| LoadError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        debug!(
            origin,
            groups = document.groups.len(),
            properties = document.properties.len(),
            "loaded metadata source"
        );
        self.merge(document);
        self.sources += 1;
        Ok(self)
    }

    /// Opens `path`, merges it, and closes it before returning.
    pub fn with_json_file(self, path: &Path) -> Result<Self, LoadError> {
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|source| LoadError::Read {
            origin: origin.clone(),
            source,
        })?;
        self.with_json_source(file, &origin)
    }

    /// Number of documents merged so far.
    pub fn source_count(&self) -> usize {
        self.sources
    }

    /// Finishes loading; the catalog is read-only from here on.
    pub fn build(self) -> Catalog {
        Catalog::from_groups(self.groups)
    }

    fn merge(&mut self, document: MetadataDocument) {
        for raw in &document.groups {
            self.groups
                .entry(raw.name.clone())
                .or_insert_with(|| Group::named(raw.name.as_str()));
        }

        for raw in document.properties {
            let group_name = owning_group(&document.groups, &raw)
                .unwrap_or(ROOT_GROUP)
                .to_string();
            let group = self
                .groups
                .entry(group_name.clone())
                .or_insert_with(|| Group::named(group_name));
            let property = raw.into_property();
            let id = property.id.clone();
            if !group.insert_if_absent(property) {
                debug!(property = %id, group = %group.name, "ignoring duplicate property");
            }
        }
    }
}

// Groups of the same document only; a property never binds to a group
// declared by another source.
fn owning_group<'a>(groups: &'a [RawGroup], property: &RawProperty) -> Option<&'a str> {
    let source_type = property.source_type.as_deref()?;
    groups
        .iter()
        .filter(|group| group.kind.as_deref() == Some(source_type))
        .filter(|group| property.name.starts_with(group.name.as_str()))
        .max_by_key(|group| group.name.len())
        .map(|group| group.name.as_str())
}
