//! Configuration metadata deprecation collector.
//!
//! Loads a legacy and a modern configuration metadata catalog, keeps the
//! groups whose names match a keyword set, and emits every legacy property
//! without a modern counterpart as a deprecation entry in the standard
//! `{"properties": [...]}` metadata shape.

pub mod annotate;
pub mod catalog;
pub mod config;
pub mod diff;
pub mod error;
pub mod ordering;
pub mod output;
pub mod pipeline;
pub mod report;
mod schema_loader;
pub mod serialize;
pub mod sources;

pub use annotate::annotate;
pub use catalog::{
    Catalog, CatalogBuilder, DefaultValue, Deprecation, DeprecationLevel, Group, GroupKeywords,
    GroupMap, Property, Scalar, select,
};
pub use config::CollectorConfig;
pub use diff::{CatalogDiff, changed, flatten, unchanged};
pub use error::{CollectError, LoadError, SerializationError};
pub use ordering::{sort_key, sort_properties};
pub use pipeline::{CatalogSide, Collection, EmptyResultWarning, RunSummary, collect, run};
pub use serialize::serialize;
pub use sources::{SourceSpec, discover, load_catalog};

/// Splits a comma or whitespace separated list, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
