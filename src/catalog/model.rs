//! In-memory shapes for configuration metadata catalogs.
//!
//! A `Catalog` is a read-only map of named `Group`s; each group owns the
//! `Property` entries assigned to it at load time. Properties are plain values:
//! the only transformation is [`Property::with_deprecation`], which returns a
//! new property carrying the marker and every original field.

use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Severity attached to a deprecation marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DeprecationLevel {
    #[default]
    Warning,
    Error,
}

impl DeprecationLevel {
    /// Lowercase name used in metadata documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeprecationLevel::Warning => "warning",
            DeprecationLevel::Error => "error",
        }
    }

    /// Parses a level from metadata text. Unknown or absent values fall back
    /// to `Warning`, which is what metadata readers assume for a bare
    /// deprecation entry.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("error") => DeprecationLevel::Error,
            _ => DeprecationLevel::Warning,
        }
    }
}

/// Deprecation marker; each field may be absent in source documents.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Deprecation {
    pub level: Option<DeprecationLevel>,
    pub reason: Option<String>,
    pub replacement: Option<String>,
}

impl Deprecation {
    pub const PLACEHOLDER_REASON: &'static str = "Todo: add deprecation reason";
    pub const PLACEHOLDER_REPLACEMENT: &'static str =
        "Todo: add replacement if exists, or delete this entry if none replacement exists";

    /// Marker applied to every legacy property without a modern counterpart.
    /// Reason and replacement are left for a human to fill in.
    pub fn placeholder() -> Self {
        Self {
            level: Some(DeprecationLevel::Error),
            reason: Some(Self::PLACEHOLDER_REASON.to_string()),
            replacement: Some(Self::PLACEHOLDER_REPLACEMENT.to_string()),
        }
    }
}

/// A single JSON scalar usable as a default value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::String(s) => Some(Scalar::String(s.clone())),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::String(_) => "string",
        }
    }

    /// JSON form written to output documents.
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => Value::Number(n.clone()),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }
}

/// Default value of a property as declared in a metadata document.
///
/// Anything that is neither a scalar nor a homogeneous array of scalars is
/// kept verbatim as `Unsupported` so loading never fails on it; the
/// serializer rejects it instead.
#[derive(Clone, Debug, PartialEq)]
pub enum DefaultValue {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
    Unsupported(Value),
}

impl DefaultValue {
    /// Classifies a raw JSON default. `null` means "no default".
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Array(items) => Some(sequence_from(&items).unwrap_or(DefaultValue::Unsupported(
                Value::Array(items),
            ))),
            other => Some(match Scalar::from_json(&other) {
                Some(scalar) => DefaultValue::Scalar(scalar),
                None => DefaultValue::Unsupported(other),
            }),
        }
    }

    /// Short description of the JSON type, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DefaultValue::Scalar(scalar) => scalar.kind(),
            DefaultValue::Sequence(_) => "array",
            DefaultValue::Unsupported(Value::Object(_)) => "object",
            DefaultValue::Unsupported(Value::Array(_)) => "mixed or nested array",
            DefaultValue::Unsupported(_) => "unknown",
        }
    }
}

fn sequence_from(items: &[Value]) -> Option<DefaultValue> {
    let scalars = items
        .iter()
        .map(Scalar::from_json)
        .collect::<Option<Vec<_>>>()?;
    let homogeneous = scalars
        .windows(2)
        .all(|pair| pair[0].kind() == pair[1].kind());
    homogeneous.then_some(DefaultValue::Sequence(scalars))
}

/// One configurable setting, identified by its dot-delimited name.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub id: String,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub default_value: Option<DefaultValue>,
    pub deprecation: Option<Deprecation>,
    /// Declaring type; only consulted when assigning the property to a group.
    pub source_type: Option<String>,
}

impl Property {
    /// Minimal property with only an identifier.
    pub fn named(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            description: None,
            default_value: None,
            deprecation: None,
            source_type: None,
        }
    }

    /// Whether a deprecation marker is present.
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    /// Returns a copy of this property carrying `marker`, replacing any marker
    /// it already had.
    pub fn with_deprecation(self, marker: Deprecation) -> Self {
        Self {
            deprecation: Some(marker),
            ..self
        }
    }
}

/// Named collection of properties keyed by id.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Group {
    pub name: String,
    pub properties: BTreeMap<String, Property>,
}

impl Group {
    /// Empty group called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Inserts `property` unless a property with the same id is already
    /// present. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, property: Property) -> bool {
        if self.properties.contains_key(&property.id) {
            return false;
        }
        self.properties.insert(property.id.clone(), property);
        true
    }
}

/// Read-only map of group name to group.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Catalog {
    groups: BTreeMap<String, Group>,
}

impl Catalog {
    pub(crate) fn from_groups(groups: BTreeMap<String, Group>) -> Self {
        Self { groups }
    }

    /// All groups, ordered by name.
    pub fn groups(&self) -> &BTreeMap<String, Group> {
        &self.groups
    }

    /// Looks up a group by exact name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of properties across all groups.
    pub fn property_count(&self) -> usize {
        self.groups.values().map(|g| g.properties.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_value_classification() {
        assert_eq!(DefaultValue::from_json(Value::Null), None);
        assert_eq!(
            DefaultValue::from_json(json!(true)),
            Some(DefaultValue::Scalar(Scalar::Bool(true)))
        );
        assert_eq!(
            DefaultValue::from_json(json!(["a", "b"])),
            Some(DefaultValue::Sequence(vec![
                Scalar::String("a".into()),
                Scalar::String("b".into()),
            ]))
        );
        assert!(matches!(
            DefaultValue::from_json(json!([1, "a"])),
            Some(DefaultValue::Unsupported(_))
        ));
        assert!(matches!(
            DefaultValue::from_json(json!({"k": 1})),
            Some(DefaultValue::Unsupported(_))
        ));
        assert_eq!(
            DefaultValue::from_json(json!([])),
            Some(DefaultValue::Sequence(Vec::new()))
        );
    }

    #[test]
    fn with_deprecation_keeps_descriptive_fields() {
        let mut property = Property::named("azure.keyvault.uri");
        property.kind = Some("java.lang.String".into());
        property.description = Some("Vault URI".into());
        let marked = property.clone().with_deprecation(Deprecation::placeholder());
        assert_eq!(marked.id, property.id);
        assert_eq!(marked.kind, property.kind);
        assert_eq!(marked.description, property.description);
        assert!(marked.is_deprecated());
        assert!(!property.is_deprecated());
    }

    #[test]
    fn level_parsing_is_lenient() {
        assert_eq!(DeprecationLevel::parse_lenient(Some("ERROR")), DeprecationLevel::Error);
        assert_eq!(DeprecationLevel::parse_lenient(Some("bogus")), DeprecationLevel::Warning);
        assert_eq!(DeprecationLevel::parse_lenient(None), DeprecationLevel::Warning);
    }
}
