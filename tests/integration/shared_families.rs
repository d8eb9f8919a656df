use crate::helpers::fixtures::doc;
use docmig::{DocumentFamily, FamilyKind};
use serde_json::json;
use std::thread;

/// Built-in families are shared read-only; each thread migrates its own document
#[test]
fn test_concurrent_migrations_share_family() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let family = DocumentFamily::builtin(FamilyKind::Service);
                let outcome = family
                    .engine()
                    .migrate(doc(json!({
                        "id": format!("svc-{}", i),
                        "migrations": null,
                        "operations": [{"id": format!("op-{}", i), "method": "GET"}]
                    })))
                    .expect("migration should succeed");
                (i, outcome)
            })
        })
        .collect();

    for handle in handles {
        let (i, outcome) = handle.join().expect("thread should not panic");
        assert_eq!(outcome.applied, vec![101, 102]);
        let content = outcome.document.object("content").unwrap();
        assert_eq!(
            content["operations"][0]["name"],
            json!(format!("op-{}-GET", i))
        );
    }
}

#[test]
fn test_builtin_family_is_a_singleton() {
    let a = DocumentFamily::builtin(FamilyKind::Chain);
    let b = DocumentFamily::builtin(FamilyKind::Chain);
    assert!(std::ptr::eq(a, b));
}
