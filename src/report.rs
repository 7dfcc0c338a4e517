//! Human-readable progress report for a comparison.

use crate::pipeline::Collection;
use std::io::{self, Write};

pub struct Report<'c, 'a> {
    collection: &'c Collection<'a>,
}

impl<'c, 'a> Report<'c, 'a> {
    pub fn new(collection: &'c Collection<'a>) -> Self {
        Self { collection }
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        let c = self.collection;

        writeln!(out)?;
        writeln!(out, "Groups in the legacy catalog: ====")?;
        write_lines(out, &c.legacy_groups)?;
        writeln!(out)?;
        writeln!(out, "Groups in the modern catalog: ====")?;
        write_lines(out, &c.modern_groups)?;

        writeln!(out)?;
        writeln!(out, "There are {} legacy properties", c.diff.legacy_count)?;
        writeln!(out, "There are {} modern properties", c.diff.modern_count)?;

        writeln!(out)?;
        writeln!(
            out,
            "There are {} unchanged properties, they are: ",
            c.diff.unchanged.len()
        )?;
        for id in &c.diff.unchanged {
            writeln!(out, "{id}")?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "There are {} changed properties, they are: ",
            c.diff.changed.len()
        )?;
        for id in &c.diff.changed {
            writeln!(out, "{id}")?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Begin to marshall all {} changed properties",
            c.deprecated.len()
        )?;
        Ok(())
    }
}

// Group names are already sorted: selections are keyed by a BTreeMap.
fn write_lines(out: &mut dyn Write, lines: &[&str]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, Deprecation, GroupKeywords};
    use crate::pipeline::collect;
    use serde_json::json;

    #[test]
    fn report_lists_groups_and_sorted_ids() {
        let legacy_doc = serde_json::to_vec(&json!({
            "groups": [{"name": "azure.keyvault", "type": "K"}, {"name": "spring.redis", "type": "R"}],
            "properties": [
                {"name": "azure.keyvault.uri", "sourceType": "K"},
                {"name": "azure.keyvault.enabled", "sourceType": "K"}
            ]
        }))
        .unwrap();
        let modern_doc = serde_json::to_vec(&json!({
            "groups": [{"name": "azure.keyvault", "type": "K"}],
            "properties": [{"name": "azure.keyvault.enabled", "sourceType": "K"}]
        }))
        .unwrap();
        let legacy = CatalogBuilder::new()
            .unwrap()
            .with_json_source(legacy_doc.as_slice(), "legacy")
            .unwrap()
            .build();
        let modern = CatalogBuilder::new()
            .unwrap()
            .with_json_source(modern_doc.as_slice(), "modern")
            .unwrap()
            .build();
        let collection = collect(
            &legacy,
            &modern,
            &GroupKeywords::defaults(),
            &Deprecation::placeholder(),
        );

        let mut buf = Vec::new();
        Report::new(&collection).write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Groups in the legacy catalog: ====\nazure.keyvault\n\n"));
        assert!(!text.contains("spring.redis"));
        assert!(text.contains("There are 2 legacy properties"));
        assert!(text.contains("There are 1 unchanged properties, they are: \nazure.keyvault.enabled\n"));
        assert!(text.contains("There are 1 changed properties, they are: \nazure.keyvault.uri\n"));
        assert!(text.trim_end().ends_with("Begin to marshall all 1 changed properties"));
    }
}
