//! Error taxonomy for loading, serializing and persisting metadata.
//!
//! Library code returns these typed errors so callers can tell a bad source
//! apart from an unrepresentable default value; the binary wraps them in
//! `anyhow` for reporting.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("search root {} does not exist", path.display())]
    MissingRoot { path: PathBuf },

    #[error("walking search root at {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("reading metadata source {origin}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("parsing metadata source {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("metadata source {origin} failed schema validation:\n{details}")]
    Invalid { origin: String, details: String },

    #[error("compiling bundled metadata schema: {0}")]
    Schema(String),
}

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("property {property} has a default value of unsupported type ({found})")]
    UnsupportedDefault {
        property: String,
        found: &'static str,
    },

    #[error("encoding metadata document")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Serialize(#[from] SerializationError),

    #[error("writing output {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing report")]
    Report(#[source] io::Error),
}
