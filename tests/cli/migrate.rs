use crate::helpers::cli::CliTestHelper;
use crate::helpers::fixtures::{FLAT_SERVICE_JSON, LEGACY_CHAIN_YAML};
use anyhow::Result;
use docmig::loader::{DocumentFormat, parse_document};
use predicates::prelude::*;
use serde_json::json;

/// Tests for `docmig migrate`
mod migrate_tests {
    use super::*;

    #[test]
    fn test_migrate_prints_single_document() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("chain.yaml", LEGACY_CHAIN_YAML)?;

        helper
            .command()
            .args(["migrate", "chain.yaml", "--family", "chain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("content:"))
            .stdout(predicate::str::contains("migrations: '[101, 102]'"))
            .stderr(predicate::str::contains("chain.yaml: applied V101, V102"));

        // Input is left alone without --in-place
        assert_eq!(helper.read_file("chain.yaml")?, LEGACY_CHAIN_YAML);
        Ok(())
    }

    #[test]
    fn test_migrate_in_place_is_idempotent() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("service.json", FLAT_SERVICE_JSON)?;

        helper
            .command()
            .args(["migrate", "service.json", "--family", "service", "--in-place"])
            .assert()
            .success();

        let migrated = helper.read_file("service.json")?;
        let document = parse_document(&migrated, DocumentFormat::Json)?;
        let content = document.object("content").expect("content object");
        assert_eq!(content["migrations"], json!("[101, 102]"));
        assert_eq!(
            content["operations"][0]["name"],
            json!("bar-publish-user/notify")
        );

        helper
            .command()
            .args(["migrate", "service.json", "--family", "service", "--in-place"])
            .assert()
            .success()
            .stderr(predicate::str::contains("already up to date"));

        assert_eq!(helper.read_file("service.json")?, migrated);
        Ok(())
    }

    #[test]
    fn test_in_place_refuses_format_change() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("chain.yaml", LEGACY_CHAIN_YAML)?;

        helper
            .command()
            .args([
                "migrate",
                "chain.yaml",
                "--family",
                "chain",
                "--in-place",
                "--format",
                "json",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Cannot convert chain.yaml to json in place",
            ));

        assert_eq!(helper.read_file("chain.yaml")?, LEGACY_CHAIN_YAML);
        assert!(!helper.exists("chain.json"));
        Ok(())
    }

    #[test]
    fn test_in_place_with_matching_format() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("chain.yaml", LEGACY_CHAIN_YAML)?;

        helper
            .command()
            .args([
                "migrate",
                "chain.yaml",
                "--family",
                "chain",
                "--in-place",
                "--format",
                "yaml",
            ])
            .assert()
            .success();

        let migrated = helper.read_file("chain.yaml")?;
        assert!(migrated.contains("migrations: '[101, 102]'"));
        assert!(!helper.exists("chain.json"));
        Ok(())
    }

    #[test]
    fn test_migrate_glob_into_output_dir() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("exports/a.yaml", "id: a\nname: A\nversion: 100\n")?;
        helper.write_file("exports/b.yaml", "id: b\nname: B\nversion: 101\ncontent: {}\n")?;

        helper
            .command()
            .args([
                "migrate",
                "exports/*.yaml",
                "--family",
                "chain",
                "--output-dir",
                "out",
                "--format",
                "json",
            ])
            .assert()
            .success()
            .stderr(predicate::str::contains("2 of 2 document(s) migrated"));

        assert!(helper.exists("out/a.json"));
        assert!(helper.exists("out/b.json"));
        assert!(!helper.exists("out/a.yaml"));

        let b = parse_document(&helper.read_file("out/b.json")?, DocumentFormat::Json)?;
        assert_eq!(b.object("content").unwrap()["migrations"], json!("[101, 102]"));
        Ok(())
    }

    #[test]
    fn test_migrate_dry_run_writes_nothing() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("chain.yaml", LEGACY_CHAIN_YAML)?;

        helper
            .command()
            .args(["migrate", "chain.yaml", "--dry-run", "--in-place"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--- chain.yaml (original)"))
            .stdout(predicate::str::contains("+content:"))
            .stdout(predicate::str::contains("-version: 100"))
            .stderr(predicate::str::contains("would be migrated"));

        assert_eq!(helper.read_file("chain.yaml")?, LEGACY_CHAIN_YAML);
        Ok(())
    }

    #[test]
    fn test_multiple_documents_need_a_destination() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("a.yaml", "id: a\nversion: 100\n")?;
        helper.write_file("b.yaml", "id: b\nversion: 100\n")?;

        helper
            .command()
            .args(["migrate", "a.yaml", "b.yaml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Use --output-dir or --in-place"));
        Ok(())
    }

    #[test]
    fn test_family_from_config_file() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_config("migration:\n  family: service\n")?;
        helper.write_file("svc.yaml", "id: s\nimportVersion: 101\ncontent: {}\n")?;

        helper
            .command()
            .args(["migrate", "svc.yaml"])
            .assert()
            .success()
            .stderr(predicate::str::contains("applied V102"));
        Ok(())
    }
}

/// Error reporting for broken documents
mod error_tests {
    use super::*;

    #[test]
    fn test_malformed_marker_fails() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("bad.yaml", "id: a\nmigrations: '[1, x, 3]'\n")?;

        helper
            .command()
            .args(["migrate", "bad.yaml", "--in-place"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to migrate bad.yaml"))
            .stderr(predicate::str::contains("malformed version field `migrations`"));

        // Nothing partial is written
        assert_eq!(
            helper.read_file("bad.yaml")?,
            "id: a\nmigrations: '[1, x, 3]'\n"
        );
        Ok(())
    }

    #[test]
    fn test_unresolved_version_fails() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_file("plain.yaml", "id: a\nname: b\n")?;

        helper
            .command()
            .args(["migrate", "plain.yaml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "could not determine the schema version of the chain document",
            ));
        Ok(())
    }

    #[test]
    fn test_unknown_versions_rejected_when_configured() -> Result<()> {
        let helper = CliTestHelper::new();
        helper.write_config("migration:\n  reject_unknown_versions: true\n")?;
        helper.write_file("future.yaml", "id: a\nmigrations: '[101, 205]'\n")?;

        helper
            .command()
            .args(["migrate", "future.yaml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("[205]"));
        Ok(())
    }

    #[test]
    fn test_missing_input_fails() {
        let helper = CliTestHelper::new();

        helper
            .command()
            .args(["migrate", "nowhere/*.yaml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No documents match"));
    }
}
