//! Property tests for exclusion pruning during collection.

use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;
use tempfile::tempdir;

use upsync::domain::services::FileCollector;
use upsync::domain::value_objects::ExclusionSet;

const NAMES: &[&str] = &["a", "b", "skip", "c.map", "d.txt"];

fn tree() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
    let segment = proptest::sample::select(NAMES);
    proptest::collection::vec(proptest::collection::vec(segment, 1..=4), 1..=12)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Nothing at or below an excluded name is ever collected,
    /// and every other file is.
    #[test]
    fn property_excluded_subtrees_are_pruned(files in tree()) {
        let dir = tempdir().unwrap();
        let mut written = BTreeSet::new();
        for segments in &files {
            let rel = segments.join("/");
            let path = dir.path().join(&rel);
            // Skip layouts where a file would need to be a directory too
            if written.iter().any(|w: &String| rel.starts_with(&format!("{}/", w))
                || w.starts_with(&format!("{}/", rel)))
            {
                continue;
            }
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, rel.as_bytes()).unwrap();
            written.insert(rel);
        }

        let collector = FileCollector::new(ExclusionSet::from_patterns(["skip", "*.map"]));
        let collected: BTreeSet<String> = collector
            .collect(dir.path())
            .iter()
            .map(|entry| entry.relative_path().to_string())
            .collect();

        let expected: BTreeSet<String> = written
            .iter()
            .filter(|rel| !rel.split('/').any(|seg| seg == "skip" || seg.ends_with(".map")))
            .cloned()
            .collect();

        prop_assert_eq!(collected, expected);
    }
}
