//! Bundled JSON Schema for configuration metadata documents.
//!
//! Every source is validated against this schema before it is deserialized so
//! a malformed document is reported with all of its violations at once rather
//! than the first serde error.

use crate::error::LoadError;
use jsonschema::JSONSchema;
use serde_json::Value;

const METADATA_SCHEMA: &str = include_str!("../schema/configuration_metadata.schema.json");

/// Compiled metadata document schema.
pub(crate) struct MetadataSchema {
    compiled: JSONSchema,
}

impl MetadataSchema {
    pub(crate) fn bundled() -> Result<Self, LoadError> {
        let raw: Value = serde_json::from_str(METADATA_SCHEMA)
            .map_err(|err| LoadError::Schema(err.to_string()))?;
        let compiled =
            JSONSchema::compile(&raw).map_err(|err| LoadError::Schema(err.to_string()))?;
        Ok(Self { compiled })
    }

    /// Checks `document` and collects every violation into one error.
    pub(crate) fn validate(&self, origin: &str, document: &Value) -> Result<(), LoadError> {
        if let Err(errors) = self.compiled.validate(document) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(LoadError::Invalid {
                origin: origin.to_string(),
                details,
            });
        }
        Ok(())
    }
}
