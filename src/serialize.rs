//! Writes properties as a `{"properties": [...]}` metadata document.
//!
//! Absent optional fields are omitted, never emitted as `null`. Every
//! property is converted before any byte is produced, so an unsupported
//! default value fails the whole document rather than truncating it.

use crate::catalog::{DefaultValue, Deprecation, Property};
use crate::error::SerializationError;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct MetadataDocument<'a> {
    properties: Vec<PropertyRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct PropertyRecord<'a> {
    name: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deprecation: Option<DeprecationRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct DeprecationRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replacement: Option<&'a str>,
}

impl<'a> From<&'a Deprecation> for DeprecationRecord<'a> {
    fn from(deprecation: &'a Deprecation) -> Self {
        Self {
            level: deprecation.level.map(|level| level.as_str()),
            reason: deprecation.reason.as_deref(),
            replacement: deprecation.replacement.as_deref(),
        }
    }
}

impl<'a> TryFrom<&'a Property> for PropertyRecord<'a> {
    type Error = SerializationError;

    fn try_from(property: &'a Property) -> Result<Self, Self::Error> {
        let default_value = property
            .default_value
            .as_ref()
            .map(|value| default_to_json(&property.id, value))
            .transpose()?;
        Ok(Self {
            name: &property.id,
            kind: property.kind.as_deref(),
            description: property.description.as_deref(),
            default_value,
            deprecation: property.deprecation.as_ref().map(DeprecationRecord::from),
        })
    }
}

fn default_to_json(id: &str, value: &DefaultValue) -> Result<Value, SerializationError> {
    match value {
        DefaultValue::Scalar(scalar) => Ok(scalar.to_json()),
        DefaultValue::Sequence(items) => Ok(Value::Array(items.iter().map(|s| s.to_json()).collect())),
        DefaultValue::Unsupported(_) => Err(SerializationError::UnsupportedDefault {
            property: id.to_string(),
            found: value.kind(),
        }),
    }
}

/// Serializes `properties` in the given order, pretty-printed with a two
/// space indent.
pub fn serialize(properties: &[Property]) -> Result<Vec<u8>, SerializationError> {
    let document = MetadataDocument {
        properties: properties
            .iter()
            .map(PropertyRecord::try_from)
            .collect::<Result<_, _>>()?,
    };
    let mut bytes = serde_json::to_vec_pretty(&document)?;
    bytes.push(b'\n');
    Ok(bytes)
}
