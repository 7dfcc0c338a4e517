//! Comparison pipeline: select, diff, annotate, order.
//!
//! `collect` is pure over two borrowed catalogs. `run` wraps it with source
//! discovery, reporting, serialization and the atomic write used by the CLI.

use crate::annotate::annotate;
use crate::catalog::{Catalog, Deprecation, GroupKeywords, Property, select};
use crate::config::CollectorConfig;
use crate::diff::CatalogDiff;
use crate::error::CollectError;
use crate::ordering::sort_properties;
use crate::output::write_atomically;
use crate::report::Report;
use crate::serialize::serialize;
use crate::sources::load_catalog;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogSide {
    Legacy,
    Modern,
}

impl fmt::Display for CatalogSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CatalogSide::Legacy => "legacy",
            CatalogSide::Modern => "modern",
        })
    }
}

/// Conditions worth surfacing that do not stop the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmptyResultWarning {
    NoRelevantGroups { side: CatalogSide },
    NoChangedProperties,
}

impl fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyResultWarning::NoRelevantGroups { side } => {
                write!(f, "no relevant groups found in the {side} catalog")
            }
            EmptyResultWarning::NoChangedProperties => f.write_str("no changed properties found"),
        }
    }
}

/// Everything one comparison produced, borrowing group names from the catalogs.
#[derive(Debug)]
pub struct Collection<'a> {
    pub legacy_groups: Vec<&'a str>,
    pub modern_groups: Vec<&'a str>,
    pub diff: CatalogDiff<'a>,
    /// Changed legacy properties, annotated and in serialization order.
    pub deprecated: Vec<Property>,
    pub warnings: Vec<EmptyResultWarning>,
}

/// Selects matching groups on both sides, diffs them by id, and marks every
/// legacy property missing from the modern side with `marker`. Warnings are
/// recorded for empty selections and an empty result; none of them fail.
pub fn collect<'a>(
    legacy: &'a Catalog,
    modern: &'a Catalog,
    keywords: &GroupKeywords,
    marker: &Deprecation,
) -> Collection<'a> {
    let legacy_selected = select(legacy, keywords);
    let modern_selected = select(modern, keywords);
    let diff = CatalogDiff::compute(&legacy_selected, &modern_selected);
    info!(
        legacy_groups = legacy_selected.len(),
        modern_groups = modern_selected.len(),
        unchanged = diff.unchanged.len(),
        changed = diff.changed.len(),
        "compared catalogs"
    );

    let changed = legacy_selected
        .values()
        .copied()
        .flat_map(|group| group.properties.values())
        .filter(|property| diff.changed.contains(property.id.as_str()))
        .cloned();
    let mut deprecated = annotate(changed, marker);
    sort_properties(&mut deprecated);

    let mut warnings = Vec::new();
    if legacy_selected.is_empty() {
        warnings.push(EmptyResultWarning::NoRelevantGroups {
            side: CatalogSide::Legacy,
        });
    }
    if modern_selected.is_empty() {
        warnings.push(EmptyResultWarning::NoRelevantGroups {
            side: CatalogSide::Modern,
        });
    }
    if diff.changed.is_empty() {
        warnings.push(EmptyResultWarning::NoChangedProperties);
    }
    for warning in &warnings {
        warn!("{warning}");
    }

    Collection {
        legacy_groups: legacy_selected.keys().copied().collect(),
        modern_groups: modern_selected.keys().copied().collect(),
        diff,
        deprecated,
        warnings,
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub unchanged: usize,
    pub deprecated: usize,
    pub warnings: Vec<EmptyResultWarning>,
}

/// Loads both sides, compares them and writes the deprecation document.
/// Report lines go to `report_out` when given.
pub fn run(
    config: &CollectorConfig,
    report_out: Option<&mut dyn Write>,
) -> Result<RunSummary, CollectError> {
    let legacy = load_catalog("legacy", &config.legacy)?;
    let modern = load_catalog("modern", &config.modern)?;
    let collection = collect(&legacy, &modern, &config.keywords, &Deprecation::placeholder());

    if let Some(out) = report_out {
        Report::new(&collection)
            .write_to(out)
            .map_err(CollectError::Report)?;
    }

    let bytes = serialize(&collection.deprecated)?;
    write_atomically(&config.output, &bytes)?;
    info!(
        output = %config.output.display(),
        properties = collection.deprecated.len(),
        "wrote deprecation metadata"
    );

    Ok(RunSummary {
        output: config.output.clone(),
        unchanged: collection.diff.unchanged.len(),
        deprecated: collection.deprecated.len(),
        warnings: collection.warnings,
    })
}
