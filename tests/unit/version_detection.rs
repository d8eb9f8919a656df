use crate::helpers::fixtures::doc;
use docmig::version::{
    ExplicitList, LegacyScalar, NestedContent, VersionResolver, parse_version_list,
};
use docmig::{MigrationError, SatisfiedVersions};
use rstest::rstest;
use serde_json::{Value, json};

fn explicit(versions: &[u32]) -> SatisfiedVersions {
    SatisfiedVersions::Explicit(versions.iter().copied().collect())
}

fn resolver() -> VersionResolver {
    VersionResolver::new(vec![
        Box::new(NestedContent::new("content", ExplicitList::new("migrations"))),
        Box::new(ExplicitList::new("migrations")),
        Box::new(LegacyScalar::new("version")),
    ])
}

#[rstest]
#[case::nested_list(json!({"content": {"migrations": "[1, 2, 5]"}}), "nested-content", explicit(&[1, 2, 5]))]
#[case::nested_null(json!({"content": {"migrations": null}}), "nested-content", explicit(&[]))]
#[case::top_level_list(json!({"migrations": "[3]"}), "explicit-list", explicit(&[3]))]
#[case::content_without_marker(json!({"content": {}, "migrations": "[4]"}), "explicit-list", explicit(&[4]))]
#[case::content_not_object(json!({"content": [1], "version": 2}), "legacy-scalar", SatisfiedVersions::UpTo(2))]
#[case::legacy(json!({"version": 7}), "legacy-scalar", SatisfiedVersions::UpTo(7))]
#[case::both_forms(json!({"migrations": "[9]", "version": 1}), "explicit-list", explicit(&[9]))]
fn test_resolution_order(
    #[case] document: Value,
    #[case] strategy: &str,
    #[case] satisfied: SatisfiedVersions,
) {
    let resolution = resolver().resolve("chain", &doc(document)).unwrap();

    assert_eq!(resolution.strategy, strategy);
    assert_eq!(resolution.satisfied, satisfied);
}

#[rstest]
#[case::bad_token(json!({"migrations": "[1, x, 3]"}))]
#[case::negative(json!({"migrations": "[-1]"}))]
#[case::wrong_type(json!({"migrations": true}))]
#[case::nested_bad_token(json!({"content": {"migrations": "[a]"}, "version": 3}))]
#[case::legacy_string(json!({"version": "3"}))]
fn test_malformed_markers(#[case] document: Value) {
    let err = resolver().resolve("chain", &doc(document)).unwrap_err();
    assert!(matches!(err, MigrationError::MalformedVersionField { .. }));
}

#[test]
fn test_partial_parse_never_happens() {
    let err = parse_version_list("migrations", "[1, x, 3]").unwrap_err();
    match err {
        MigrationError::MalformedVersionField { field, reason, .. } => {
            assert_eq!(field, "migrations");
            assert!(reason.contains("`x`"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_custom_strategy_order() {
    // Legacy first: ordering is configuration, not discovery
    let resolver = VersionResolver::new(vec![
        Box::new(LegacyScalar::new("version")),
        Box::new(ExplicitList::new("migrations")),
    ]);

    let resolution = resolver
        .resolve("chain", &doc(json!({"migrations": "[9]", "version": 1})))
        .unwrap();
    assert_eq!(resolution.satisfied, SatisfiedVersions::UpTo(1));
}
