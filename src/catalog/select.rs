//! Keyword-based group selection.

use crate::catalog::model::{Catalog, Group};
use crate::split_list;
use std::collections::{BTreeMap, BTreeSet};

/// Group keywords used when nothing else is configured.
pub const DEFAULT_GROUP_KEYWORDS: &[&str] = &["azure", "keyvault", "servicebus", "eventhub", "cosmos"];

/// Selected groups keyed by name, borrowed from their catalog.
pub type GroupMap<'a> = BTreeMap<&'a str, &'a Group>;

/// Substrings that mark a group as relevant. Matching is case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GroupKeywords(BTreeSet<String>);

impl GroupKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            keywords
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.is_empty())
                .collect(),
        )
    }

    /// Parses a comma or whitespace separated list.
    pub fn from_list(raw: &str) -> Self {
        Self::new(split_list(raw))
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_GROUP_KEYWORDS.iter().copied())
    }

    pub fn matches(&self, group_name: &str) -> bool {
        self.0.iter().any(|keyword| group_name.contains(keyword.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Returns the groups of `catalog` whose name contains at least one keyword.
pub fn select<'a>(catalog: &'a Catalog, keywords: &GroupKeywords) -> GroupMap<'a> {
    catalog
        .groups()
        .iter()
        .filter(|(name, _)| keywords.matches(name))
        .map(|(name, group)| (name.as_str(), group))
        .collect()
}
