//! Serialization order for properties.
//!
//! Non-deprecated entries come first, then ids in natural string order. The
//! sort is stable so equal keys keep their input order.

use crate::catalog::Property;
use std::cmp::Ordering;

/// Composite ordering key `(is_deprecated, id)`.
pub fn sort_key(property: &Property) -> (bool, &str) {
    (property.is_deprecated(), property.id.as_str())
}

/// Total order over properties by [`sort_key`].
pub fn compare(a: &Property, b: &Property) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Sorts in place; ties keep their input order.
pub fn sort_properties(properties: &mut [Property]) {
    properties.sort_by(compare);
}
