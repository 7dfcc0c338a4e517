//! Applies a deprecation marker to changed properties.

use crate::catalog::{Deprecation, Property};

/// Marks every property with `marker`, overwriting any marker it already
/// carried. Applying the same marker twice is the same as applying it once.
pub fn annotate<I>(properties: I, marker: &Deprecation) -> Vec<Property>
where
    I: IntoIterator<Item = Property>,
{
    properties
        .into_iter()
        .map(|property| property.with_deprecation(marker.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeprecationLevel;

    #[test]
    fn every_property_receives_the_marker() {
        let mut already = Property::named("b");
        already.deprecation = Some(Deprecation {
            level: Some(DeprecationLevel::Warning),
            reason: Some("old".into()),
            replacement: None,
        });
        let marked = annotate(vec![Property::named("a"), already], &Deprecation::placeholder());
        assert_eq!(marked.len(), 2);
        for property in &marked {
            assert_eq!(property.deprecation, Some(Deprecation::placeholder()));
        }
    }

    #[test]
    fn annotation_is_idempotent() {
        let marker = Deprecation::placeholder();
        let once = annotate(vec![Property::named("azure.keyvault.uri")], &marker);
        let twice = annotate(once.clone(), &marker);
        assert_eq!(once, twice);
    }
}
