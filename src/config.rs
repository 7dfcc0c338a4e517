//! Run configuration and its defaults.
//!
//! Defaults describe the usual layout: legacy metadata shipped under
//! `META-INF/`, modern metadata as a standalone file, and output written to
//! the working directory. Group keywords can be widened or replaced through
//! `COLLECTOR_GROUP_KEYWORDS` without touching the command line.

use crate::catalog::GroupKeywords;
use crate::sources::SourceSpec;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_LEGACY_PATTERN: &str = "META-INF/spring-configuration-metadata.json";
pub const DEFAULT_MODERN_PATTERN: &str = "spring-cloud-azure-4.0-configuration-metadata.json";
pub const DEFAULT_OUTPUT: &str = "additional-spring-configuration-metadata.json";
pub const ENV_GROUP_KEYWORDS: &str = "COLLECTOR_GROUP_KEYWORDS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectorConfig {
    pub keywords: GroupKeywords,
    pub legacy: SourceSpec,
    pub modern: SourceSpec,
    pub output: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            keywords: GroupKeywords::defaults(),
            legacy: SourceSpec::new(vec![PathBuf::from(".")], DEFAULT_LEGACY_PATTERN),
            modern: SourceSpec::new(vec![PathBuf::from(".")], DEFAULT_MODERN_PATTERN),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Picks the keyword set: explicit values first, then the env override, then
/// the built-in defaults. An explicitly empty env value selects nothing.
pub fn resolve_keywords(explicit: &[String], env_value: Option<&str>) -> GroupKeywords {
    if !explicit.is_empty() {
        return GroupKeywords::new(explicit.iter().flat_map(|raw| crate::split_list(raw)));
    }
    match env_value {
        Some(raw) => GroupKeywords::from_list(raw),
        None => GroupKeywords::defaults(),
    }
}

pub fn keywords_from_env() -> Option<String> {
    env::var(ENV_GROUP_KEYWORDS).ok()
}
