/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/php-packages.json")
}

/// Write a config that registers the fixture as a local ecosystem.
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let config = format!(
        "ecosystems:\n  local:\n    label: Local PHP\n    url: {}\n    package_url_template: \"https://packagist.org/packages/{{name}}\"\ndefault_ecosystem: local\n{}",
        fixture_path().display(),
        extra
    );
    let path = dir.join("ossatrisk.config.yml");
    fs::write(&path, config).unwrap();
    path
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_config_is_discovered_in_working_directory() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "format: markdown\n");

    cargo_bin_cmd!("ossatrisk")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# 📦 local packages"))
        .stdout(predicate::str::contains(
            "[symfony/polyfill-legacy](https://packagist.org/packages/symfony/polyfill-legacy)",
        ));
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "sort: name\n");

    let output = cargo_bin_cmd!("ossatrisk")
        .arg("--config")
        .arg(&config)
        .arg("--no-color")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("sorted by Package ↑"));
    let acme = stdout.find("acme/http-client").unwrap();
    let vendor = stdout.find("vendor/unmaintained").unwrap();
    assert!(acme < vendor);
}

#[test]
fn test_cli_flags_override_config() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "format: markdown\nsort: name\n");

    cargo_bin_cmd!("ossatrisk")
        .current_dir(dir.path())
        .args(["-f", "html", "--preset", "cves_count_desc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<option value=\"cves_count_desc\" selected>"))
        .stdout(predicate::str::contains("# 📦").not());
}

#[test]
fn test_staleness_thresholds_from_config() {
    let dir = TempDir::new().unwrap();
    // every dated release in the fixture is older than a day
    write_config(
        dir.path(),
        "format: html\nstaleness:\n  aging_after_days: 0\n  stale_after_days: 1\n",
    );

    cargo_bin_cmd!("ossatrisk")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("success-cell").not())
        .stdout(predicate::str::contains("warning-cell").not())
        .stdout(predicate::str::contains("error-cell"));
}

#[test]
fn test_unknown_fields_warn_but_succeed() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "colour: always\n");

    cargo_bin_cmd!("ossatrisk")
        .current_dir(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown config field 'colour'"));
}

#[test]
fn test_invalid_config_is_application_error() {
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "staleness:\n  aging_after_days: 900\n  stale_after_days: 100\n",
    );

    cargo_bin_cmd!("ossatrisk")
        .current_dir(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_missing_explicit_config_is_application_error() {
    cargo_bin_cmd!("ossatrisk")
        .args(["--config", "/nonexistent/ossatrisk.config.yml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_malformed_yaml_is_application_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ossatrisk.config.yml"),
        "ecosystems: [[[broken",
    )
    .unwrap();

    cargo_bin_cmd!("ossatrisk")
        .current_dir(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse config file"));
}
