//! Property-based tests for path name generation.
//!
//! Generated names must always be usable as labels: non-empty, trimmed,
//! with whitespace runs collapsed, no matter what the path looks like.

use proptest::prelude::*;

use quickpath::naming::{generate_name, generate_unique_name};

/// Strategy for path segments without raw whitespace, the way they appear in
/// real URLs: alphanumerics plus percent escapes, `+`, and entity-ish runs.
fn arb_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9%+&;._-]{1,12}"
}

/// Strategy for multi-segment paths built from `arb_segment`.
fn arb_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_segment(), 1..5)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Whatever the path, the generated name is never empty.
    #[test]
    fn generated_name_is_never_empty(path in arb_path()) {
        let name = generate_name(&path);
        prop_assert!(!name.is_empty(), "empty name for path {:?}", path);
    }

    // Names are trimmed and contain no whitespace runs.
    #[test]
    fn generated_name_has_normalized_whitespace(path in arb_path()) {
        let name = generate_name(&path);
        prop_assert_eq!(name.trim(), name.as_str());
        prop_assert!(!name.contains("  "), "double space in {:?}", name);
    }

    // Name generation is pure: same path, same name.
    #[test]
    fn generated_name_is_deterministic(path in arb_path()) {
        prop_assert_eq!(generate_name(&path), generate_name(&path));
    }

    // A plain alphanumeric last segment is its own name.
    #[test]
    fn plain_last_segment_is_kept_verbatim(
        prefix in "[a-z]{1,8}",
        last in "[a-zA-Z0-9_.-]{1,12}",
    ) {
        let path = format!("/{}/{}", prefix, last);
        prop_assert_eq!(generate_name(&path), last);
    }

    // %20 between two plain words decodes to a single space.
    #[test]
    fn percent_twenty_joins_words_with_space(
        a in "[a-zA-Z0-9]{1,8}",
        b in "[a-zA-Z0-9]{1,8}",
    ) {
        let path = format!("/docs/{}%20{}", a, b);
        prop_assert_eq!(generate_name(&path), format!("{} {}", a, b));
    }

    // Trailing query or fragment noise never leaks into the name.
    #[test]
    fn query_and_fragment_are_stripped(
        last in "[a-zA-Z0-9]{1,10}",
        noise in "[a-z=&0-9]{0,10}",
    ) {
        let with_query = format!("/a/{}?{}", last, noise);
        let with_fragment = format!("/a/{}#{}", last, noise);
        prop_assert_eq!(generate_name(&with_query), last.clone());
        prop_assert_eq!(generate_name(&with_fragment), last);
    }

    // The disambiguation helper never returns a name already in use.
    #[test]
    fn unique_name_is_absent_from_existing(
        base in "[a-zA-Z]{1,10}",
        taken in proptest::collection::vec("[a-zA-Z() 0-9]{1,14}", 0..8),
    ) {
        let unique = generate_unique_name(&base, &taken);
        prop_assert!(!taken.contains(&unique));
    }

    // When the base name is free it is used as-is.
    #[test]
    fn unique_name_prefers_the_base(base in "[a-zA-Z]{1,10}") {
        let taken = vec![format!("{} (1)", base)];
        prop_assert_eq!(generate_unique_name(&base, &taken), base);
    }
}
