//! Configuration metadata catalogs.
//!
//! `builder` turns metadata documents (the standard `groups`/`properties`
//! JSON shape) into a read-only `Catalog`; `select` narrows a catalog down to
//! the groups relevant for a comparison. Types here mirror the document
//! fields; the pipeline only ever borrows catalogs.

pub mod builder;
pub mod model;
pub mod select;

pub use builder::{CatalogBuilder, ROOT_GROUP};
pub use model::{
    Catalog, DefaultValue, Deprecation, DeprecationLevel, Group, Property, Scalar,
};
pub use select::{DEFAULT_GROUP_KEYWORDS, GroupKeywords, GroupMap, select};
