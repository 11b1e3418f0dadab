//! Property tests for remote path normalization.

use proptest::prelude::*;

use upsync::domain::value_objects::RemotePath;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,11}").unwrap()
}

fn relative_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=5).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalization never panics on arbitrary input.
    #[test]
    fn property_new_never_panics(s in "(?s).{0,256}") {
        let path = RemotePath::new(&s);
        let _ = path.parent();
    }

    /// PROPERTY: Normalized paths contain no empty or `.` segments.
    #[test]
    fn property_new_is_normalized(s in "[a-z./\\\\]{0,64}") {
        let path = RemotePath::new(&s);
        let text = path.as_str();
        prop_assert!(!text.contains("//"));
        prop_assert_eq!(text.contains('\\'), s.contains('\\'));
        prop_assert!(text == "/" || text == "." || !text.ends_with('/'));
        prop_assert!(text == "." || !text.split('/').any(|seg| seg == "."), "{}", text);
        prop_assert_eq!(RemotePath::new(text), path.clone());
    }

    /// PROPERTY: Joining a relative path keeps the result under the root.
    #[test]
    fn property_join_stays_under_root(
        root in relative_path(),
        rel in relative_path(),
    ) {
        let root = RemotePath::new(format!("/{}", root));
        let joined = root.join(&rel);

        let root_prefix = format!("{}/", root);
        prop_assert!(joined.as_str().starts_with(&root_prefix));
        prop_assert_eq!(joined.as_str(), format!("{}/{}", root, rel));
    }

    /// PROPERTY: Walking `parent()` from a joined path reaches the root.
    #[test]
    fn property_parents_reach_root(
        root in relative_path(),
        rel in relative_path(),
    ) {
        let root = RemotePath::new(format!("/{}", root));
        let mut current = root.join(&rel);
        let depth = rel.split('/').count();

        for _ in 0..depth {
            current = current.parent().expect("parent above the root exists");
        }
        prop_assert_eq!(current, root);
    }
}
