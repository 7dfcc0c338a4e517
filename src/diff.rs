//! Identifier-level comparison of two group selections.
//!
//! Two properties are the same when their ids are equal; type, description
//! and default drift between catalogs is not considered.

use crate::catalog::GroupMap;
use std::collections::BTreeSet;

/// Every property id across `groups`.
pub fn flatten<'a>(groups: &GroupMap<'a>) -> BTreeSet<&'a str> {
    groups
        .values()
        .copied()
        .flat_map(|group| group.properties.keys())
        .map(String::as_str)
        .collect()
}

/// Ids present on both sides.
pub fn unchanged<'a>(legacy: &GroupMap<'a>, modern: &GroupMap<'_>) -> BTreeSet<&'a str> {
    let modern_ids = flatten(modern);
    flatten(legacy)
        .into_iter()
        .filter(|id| modern_ids.contains(*id))
        .collect()
}

/// Legacy ids that are not in `unchanged`.
pub fn changed<'a>(legacy: &GroupMap<'a>, unchanged: &BTreeSet<&str>) -> BTreeSet<&'a str> {
    flatten(legacy)
        .into_iter()
        .filter(|id| !unchanged.contains(*id))
        .collect()
}

/// Result of comparing a legacy selection with a modern one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogDiff<'a> {
    pub legacy_count: usize,
    pub modern_count: usize,
    pub unchanged: BTreeSet<&'a str>,
    pub changed: BTreeSet<&'a str>,
}

impl<'a> CatalogDiff<'a> {
    pub fn compute(legacy: &GroupMap<'a>, modern: &GroupMap<'_>) -> Self {
        let unchanged = unchanged(legacy, modern);
        let changed = changed(legacy, &unchanged);
        Self {
            legacy_count: flatten(legacy).len(),
            modern_count: flatten(modern).len(),
            unchanged,
            changed,
        }
    }
}
