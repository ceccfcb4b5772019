/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/php-packages.json";

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - table rendered from loaded data
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("ossatrisk")
            .args(["--source", FIXTURE])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("ossatrisk").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("ossatrisk")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 1: the data could not be loaded
    #[test]
    fn test_exit_code_load_failed() {
        cargo_bin_cmd!("ossatrisk")
            .args(["--source", "/nonexistent/php-packages.json", "--quiet"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("failed to load data"));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("ossatrisk")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("ossatrisk")
            .args(["-f", "json"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - unknown ecosystem
    #[test]
    fn test_exit_code_unknown_ecosystem() {
        cargo_bin_cmd!("ossatrisk")
            .args(["-e", "cobol"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Unknown ecosystem: cobol"));
    }

    /// Exit code 3: Application error - unknown sort column
    #[test]
    fn test_exit_code_unknown_sort_column() {
        cargo_bin_cmd!("ossatrisk")
            .args(["--source", FIXTURE, "--sort", "popularity"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Unknown sort column: popularity"));
    }
}

#[test]
fn test_text_output() {
    cargo_bin_cmd!("ossatrisk")
        .args(["--source", FIXTURE, "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 / 4 packages"))
        .stdout(predicate::str::contains("symfony/polyfill-legacy"))
        .stdout(predicate::str::contains("sorted by Score ↓"));
}

#[test]
fn test_query_and_sort_flags() {
    let output = cargo_bin_cmd!("ossatrisk")
        .args([
            "--source", FIXTURE, "--no-color", "-q", "O", "--sort", "name", "--order", "desc",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("3 / 4 packages"));
    assert!(!stdout.contains("acme/http-client"));
    let vendor = stdout.find("vendor/unmaintained").unwrap();
    let symfony = stdout.find("symfony/polyfill-legacy").unwrap();
    let monolog = stdout.find("monolog/monolog-bridge").unwrap();
    assert!(vendor < symfony && symfony < monolog);
}

#[test]
fn test_markdown_output() {
    cargo_bin_cmd!("ossatrisk")
        .args(["--source", FIXTURE, "-f", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Package | Downloads |"))
        .stdout(predicate::str::contains("_(abandoned)_"))
        .stdout(predicate::str::contains("⚠️ 2"));
}

#[test]
fn test_html_output_to_file() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("table.html");

    cargo_bin_cmd!("ossatrisk")
        .args(["--source", FIXTURE, "-f", "html", "--preset", "name_asc", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Output complete"));

    let html = fs::read_to_string(&output_path).unwrap();
    assert!(html.contains("<tbody id=\"package-table\">"));
    assert!(html.contains("<option value=\"name_asc\" selected>"));
    assert!(html.contains("id=\"stat-total\""));
    assert!(html.contains("<span class=\"pkg-vendor\">acme/</span>"));
}

#[test]
fn test_empty_result_is_not_an_error() {
    cargo_bin_cmd!("ossatrisk")
        .args(["--source", FIXTURE, "--no-color", "-q", "zzz-no-match"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("no packages match your filter"))
        .stdout(predicate::str::contains("0 / 4 packages"));
}

#[test]
fn test_interactive_session_reads_commands_from_stdin() {
    cargo_bin_cmd!("ossatrisk")
        .args(["--source", FIXTURE, "--no-color", "-i", "--quiet"])
        .write_stdin("search acme\nsort downloads_total\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 / 4 packages"))
        .stdout(predicate::str::contains("sorted by Downloads ↓"));
}
