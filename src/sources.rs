//! Locates metadata documents under search roots.
//!
//! A `SourceSpec` pairs a list of roots with a relative pattern such as
//! `META-INF/spring-configuration-metadata.json`. A root that is itself a file
//! is taken as-is; a directory root is walked and every file whose trailing
//! path components equal the pattern's components is returned.

use crate::catalog::{Catalog, CatalogBuilder};
use crate::error::LoadError;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Where to look for one side's metadata documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSpec {
    pub roots: Vec<PathBuf>,
    pub pattern: String,
}

impl SourceSpec {
    /// Searches `roots` in order for files matching `pattern`.
    pub fn new(roots: Vec<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            roots,
            pattern: pattern.into(),
        }
    }

    /// Pattern split into path components, ignoring leading `/` and `.`.
    fn pattern_components(&self) -> Vec<&str> {
        Path::new(&self.pattern)
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect()
    }
}

/// All documents matching `spec`, roots in order, files sorted by name within
/// a root. Walk failures (unreadable directories included) abort discovery.
pub fn discover(spec: &SourceSpec) -> Result<Vec<PathBuf>, LoadError> {
    let pattern = spec.pattern_components();
    let mut seen = BTreeSet::new();
    let mut found = Vec::new();

    for root in &spec.roots {
        if !root.exists() {
            return Err(LoadError::MissingRoot { path: root.clone() });
        }
        let mut matches = Vec::new();
        if root.is_file() {
            matches.push(root.clone());
        } else {
            walk(root, &pattern, &mut matches)?;
        }
        for path in matches {
            let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                found.push(path);
            }
        }
    }
    Ok(found)
}

fn walk(root: &Path, pattern: &[&str], out: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    // Symlinked directories are not descended into; a link back to an
    // ancestor would otherwise revisit the tree until the hop limit.
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;
        if is_document(&entry) && ends_with_components(entry.path(), pattern) {
            out.push(entry.into_path());
        }
    }
    Ok(())
}

// Regular files, plus symlinks that resolve to one.
fn is_document(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn ends_with_components(path: &Path, pattern: &[&str]) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let parts: Vec<_> = path.components().filter_map(|c| c.as_os_str().to_str()).collect();
    parts.ends_with(pattern)
}

/// Discovers and loads every document for one side into a single catalog.
pub fn load_catalog(label: &str, spec: &SourceSpec) -> Result<Catalog, LoadError> {
    let paths = discover(spec)?;
    let mut builder = CatalogBuilder::new()?;
    for path in &paths {
        debug!(side = label, path = %path.display(), "reading metadata source");
        builder = builder.with_json_file(path)?;
    }
    let sources = builder.source_count();
    let catalog = builder.build();
    info!(
        side = label,
        sources,
        groups = catalog.groups().len(),
        properties = catalog.property_count(),
        pattern = %spec.pattern,
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn finds_nested_matches_in_sorted_order() {
        let temp = TempDir::new().unwrap();
        let b = touch(temp.path(), "b/META-INF/meta.json", "{}");
        let a = touch(temp.path(), "a/META-INF/meta.json", "{}");
        touch(temp.path(), "c/meta.json", "{}");
        touch(temp.path(), "d/META-INF/other.json", "{}");

        let spec = SourceSpec::new(vec![temp.path().to_path_buf()], "META-INF/meta.json");
        assert_eq!(discover(&spec).unwrap(), vec![a, b]);

        let leading = SourceSpec::new(vec![temp.path().to_path_buf()], "/META-INF/meta.json");
        assert_eq!(discover(&leading).unwrap().len(), 2);
    }

    #[test]
    fn file_roots_are_used_directly_and_deduplicated() {
        let temp = TempDir::new().unwrap();
        let file = touch(temp.path(), "x/legacy.json", "{}");
        let spec = SourceSpec::new(
            vec![file.clone(), temp.path().to_path_buf()],
            "legacy.json",
        );
        assert_eq!(discover(&spec).unwrap(), vec![file]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let spec = SourceSpec::new(vec![temp.path().join("absent")], "meta.json");
        assert!(matches!(discover(&spec), Err(LoadError::MissingRoot { .. })));
    }

    #[test]
    fn no_matches_loads_an_empty_catalog() {
        let temp = TempDir::new().unwrap();
        let spec = SourceSpec::new(vec![temp.path().to_path_buf()], "meta.json");
        let catalog = load_catalog("legacy", &spec).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_catalog_merges_every_source() {
        let temp = TempDir::new().unwrap();
        touch(
            temp.path(),
            "one/meta.json",
            r#"{"groups":[{"name":"azure","type":"T"}],"properties":[{"name":"azure.a","sourceType":"T"}]}"#,
        );
        touch(
            temp.path(),
            "two/meta.json",
            r#"{"groups":[{"name":"azure","type":"T"}],"properties":[{"name":"azure.b","sourceType":"T"}]}"#,
        );
        let spec = SourceSpec::new(vec![temp.path().to_path_buf()], "meta.json");
        let catalog = load_catalog("legacy", &spec).unwrap();
        assert_eq!(catalog.group("azure").unwrap().properties.len(), 2);
        assert_eq!(catalog.property_count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycles_are_not_followed() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let doc = touch(temp.path(), "jar/META-INF/meta.json", "{}");
        symlink(temp.path(), temp.path().join("jar/loop")).unwrap();
        symlink(temp.path(), temp.path().join("jar/loop2")).unwrap();

        let spec = SourceSpec::new(vec![temp.path().to_path_buf()], "META-INF/meta.json");
        assert_eq!(discover(&spec).unwrap(), vec![doc]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_document_is_discovered() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let target = touch(temp.path(), "store/real.json", "{}");
        let link = temp.path().join("jar/META-INF/meta.json");
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        symlink(&target, &link).unwrap();

        let spec = SourceSpec::new(vec![temp.path().join("jar")], "META-INF/meta.json");
        assert_eq!(discover(&spec).unwrap(), vec![link]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_a_walk_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        touch(temp.path(), "ok/META-INF/meta.json", "{}");
        let locked = temp.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // Running with privileges that bypass directory permissions.
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let spec = SourceSpec::new(vec![temp.path().to_path_buf()], "META-INF/meta.json");
        let result = discover(&spec);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        match result {
            Err(LoadError::Walk { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected walk error, got {other:?}"),
        }
    }
}
