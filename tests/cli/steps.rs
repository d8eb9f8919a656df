use crate::helpers::cli::CliTestHelper;
use predicates::prelude::*;

#[test]
fn test_steps_lists_service_migrations() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .args(["steps", "--family", "service"])
        .assert()
        .success()
        .stdout(predicate::str::contains("service document migrations"))
        .stdout(predicate::str::contains("importVersion (legacy)"))
        .stdout(predicate::str::contains("V101"))
        .stdout(predicate::str::contains(
            "Name unnamed operations after their id, method and path",
        ));
}

#[test]
fn test_family_from_environment() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .env("DOCMIG_FAMILY", "service")
        .args(["steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("service document migrations"));
}

#[test]
fn test_invalid_family_is_rejected() {
    let helper = CliTestHelper::new();

    helper
        .command()
        .args(["steps", "--family", "deployment"])
        .assert()
        .failure();
}
