//! Property tests for hash-based change detection.

use std::fs;

use proptest::prelude::*;
use tempfile::tempdir;

use upsync::domain::entities::FileEntry;
use upsync::domain::services::ChangeDetector;
use upsync::DeployCache;

fn contents() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..64), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Against its own candidate cache, every file is unchanged.
    #[test]
    fn property_candidate_cache_marks_everything_unchanged(files in contents()) {
        let dir = tempdir().unwrap();
        let entries: Vec<FileEntry> = files
            .iter()
            .enumerate()
            .map(|(i, bytes)| {
                let path = dir.path().join(format!("f{}.bin", i));
                fs::write(&path, bytes).unwrap();
                FileEntry::new(path, format!("f{}.bin", i))
            })
            .collect();

        let first = ChangeDetector::detect(&entries, &DeployCache::new()).unwrap();
        prop_assert_eq!(first.changed.len(), entries.len());

        let second = ChangeDetector::detect(&entries, &first.candidate).unwrap();
        prop_assert!(second.changed.is_empty());
        prop_assert_eq!(second.unchanged, entries.len());
    }

    /// PROPERTY: Flipping one byte of one file reclassifies exactly that file.
    #[test]
    fn property_one_byte_change_is_detected(
        files in contents(),
        pick in any::<prop::sample::Index>(),
        offset in any::<prop::sample::Index>(),
    ) {
        let dir = tempdir().unwrap();
        let entries: Vec<FileEntry> = files
            .iter()
            .enumerate()
            .map(|(i, bytes)| {
                let path = dir.path().join(format!("f{}.bin", i));
                fs::write(&path, bytes).unwrap();
                FileEntry::new(path, format!("f{}.bin", i))
            })
            .collect();
        let cache = ChangeDetector::detect(&entries, &DeployCache::new()).unwrap().candidate;

        let victim = pick.index(files.len());
        let mut mutated = files[victim].clone();
        let at = offset.index(mutated.len());
        mutated[at] ^= 0xFF;
        fs::write(entries[victim].local_path(), &mutated).unwrap();

        let result = ChangeDetector::detect(&entries, &cache).unwrap();
        prop_assert_eq!(result.changed.len(), 1);
        prop_assert_eq!(result.changed[0].relative_path(), entries[victim].relative_path());
        prop_assert_eq!(result.unchanged, entries.len() - 1);
    }
}
