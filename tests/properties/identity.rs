//! Property tests for identity/entry-path resolution.

use proptest::prelude::*;

use grimoire_registry::{PackageIdentity, RegistryError};

fn segment() -> impl Strategy<Value = String> {
    // Valid slug segments; '.' is left out so the strategy can never
    // collide with the `.`/`..` traversal cases tested separately.
    proptest::string::string_regex("[A-Za-z0-9_-]{1,16}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: from_entry_path is a left-inverse of entry_path.
    #[test]
    fn property_entry_path_round_trip(
        owner in segment(),
        repo in segment(),
        path in proptest::collection::vec(segment(), 0..=3),
    ) {
        let identity = PackageIdentity::with_path(owner, repo, path);
        let entry_path = identity.entry_path().expect("valid segments must resolve");
        let parsed = PackageIdentity::from_entry_path(entry_path.as_str())
            .expect("entry_path output must parse back");

        prop_assert_eq!(parsed, identity);
    }

    /// PROPERTY: any identity containing a `..` segment fails to resolve.
    #[test]
    fn property_dot_dot_segment_always_rejected(
        owner in segment(),
        repo in segment(),
        prefix in proptest::collection::vec(segment(), 0..=2),
        suffix in proptest::collection::vec(segment(), 0..=2),
    ) {
        let mut path = prefix;
        path.push("..".to_string());
        path.extend(suffix);

        let identity = PackageIdentity::with_path(owner, repo, path);
        let result = identity.entry_path();

        let is_invalid_identity = matches!(result, Err(RegistryError::InvalidIdentity { .. }));
        prop_assert!(is_invalid_identity);
    }

    /// PROPERTY: entry_path never panics on arbitrary segment content.
    #[test]
    fn property_entry_path_never_panics(
        owner in "(?s).{0,32}",
        repo in "(?s).{0,32}",
    ) {
        let _ = PackageIdentity::new(owner, repo).entry_path();
    }

    /// PROPERTY: from_entry_path never panics on arbitrary input.
    #[test]
    fn property_from_entry_path_never_panics(
        input in "(?s).{0,64}"
    ) {
        let _ = PackageIdentity::from_entry_path(&input);
    }
}
