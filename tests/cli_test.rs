//! End-to-end tests for the seoscore binary
//!
//! Each test runs in its own temp directory with an isolated config home so
//! neither a project seoscore.toml nor the user's config leaks in.

use std::path::Path;
use std::process::{Command, Output};

const CHECKLIST: &str = r#"
name = "Tiny"

[[categories]]
id = "technical"
name = "Technical"
weight = 30

[[categories.checks]]
id = "https"
name = "HTTPS"
importance = "critical"

[[categories.checks]]
id = "sitemap"
name = "Sitemap, XML"
importance = "medium"

[[categories]]
id = "content"
name = "Content"
weight = 70

[[categories.checks]]
id = "copy"
name = "Original copy"
importance = "high"
"#;

const ANSWERS: &str = r#"
checklist = "tiny.toml"

[statuses]
https = "pass"
sitemap = "fail"
copy = "pass"

[notes]
sitemap = "404 at /sitemap.xml"
"#;

fn seoscore(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seoscore"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("SEOSCORE_USER_AGENT")
        .env_remove("SEOSCORE_TIMEOUT_SECS")
        .output()
        .expect("failed to run seoscore")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn audit_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tiny.toml"), CHECKLIST).unwrap();
    std::fs::write(dir.path().join("audit.toml"), ANSWERS).unwrap();
    dir
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let out = seoscore(dir.path(), &["version"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("seoscore "));
}

#[test]
fn test_checklist_lists_builtin_checks() {
    let dir = tempfile::tempdir().unwrap();
    let out = seoscore(dir.path(), &["checklist", "--format", "json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let categories = value["categories"].as_array().unwrap();
    assert!(categories.iter().any(|c| c["id"] == "technical"));
    assert!(!categories.iter().any(|c| c["id"] == "brand"));
}

#[test]
fn test_checklist_brand_variant_adds_category() {
    let dir = tempfile::tempdir().unwrap();
    let out = seoscore(dir.path(), &["checklist", "--variant", "brand", "--format", "json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let categories = value["categories"].as_array().unwrap();
    assert!(categories.iter().any(|c| c["id"] == "brand"));
}

#[test]
fn test_score_json() {
    let dir = audit_dir();
    let out = seoscore(dir.path(), &["score", "audit.toml", "--format", "json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    // technical: 4 of 6 -> 67, content: 100, overall (30*67 + 70*100) / 100
    assert_eq!(value["overall_score"], 90);
    assert_eq!(value["checklist"], "Tiny");
}

#[test]
fn test_score_csv_file_from_extension() {
    let dir = audit_dir();
    let out = seoscore(dir.path(), &["score", "audit.toml", "-o", "report.csv"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("report.csv"));

    let csv = std::fs::read_to_string(dir.path().join("report.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Category,Priority,Check Name,Description,Status,Notes,Link")
    );
    assert!(csv.contains("\"Sitemap, XML\""));
    assert!(csv.contains("404 at /sitemap.xml"));
}

#[test]
fn test_score_fail_under() {
    let dir = audit_dir();

    let out = seoscore(dir.path(), &["score", "audit.toml", "--fail-under", "95"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("below"));

    let out = seoscore(dir.path(), &["score", "audit.toml", "--fail-under", "90"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
}

#[test]
fn test_score_explain_goes_to_stderr_for_json() {
    let dir = audit_dir();
    let out = seoscore(
        dir.path(),
        &["score", "audit.toml", "--format", "json", "--explain-score"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    serde_json::from_str::<serde_json::Value>(&stdout(&out)).unwrap();
    assert!(!stderr(&out).is_empty());
}

#[test]
fn test_score_invalid_answers_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.toml"), "[statuses]\nhttps = \"maybe\"\n").unwrap();

    let out = seoscore(dir.path(), &["score", "broken.toml"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Cannot score"));
}

#[test]
fn test_score_missing_answers_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = seoscore(dir.path(), &["score", "nope.toml"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("nope.toml"));
}

#[test]
fn test_analyze_unreachable_host_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = seoscore(
        dir.path(),
        &["analyze", "http://127.0.0.1:9/", "--format", "json", "--suggest"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert!(value["error"].is_string());
    assert_eq!(value["suggestions"], serde_json::json!([]));
}

#[test]
fn test_init_writes_project_config() {
    let dir = tempfile::tempdir().unwrap();
    let out = seoscore(dir.path(), &["init"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(dir.path().join("seoscore.toml").exists());

    // project defaults are picked up by later commands
    let out = seoscore(dir.path(), &["checklist", "--format", "json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
}

#[test]
fn test_audit_non_interactive_skips_to_end() {
    let dir = audit_dir();
    // stdin is closed, so every prompt reads as skip
    let out = Command::new(env!("CARGO_BIN_EXE_seoscore"))
        .args([
            "audit",
            "--resume",
            "audit.toml",
            "--save",
            "saved.json",
            "--format",
            "json",
        ])
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .stdin(std::process::Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("saved.json")).unwrap())
            .unwrap();
    assert_eq!(saved["statuses"]["sitemap"], "fail");
    assert_eq!(saved["notes"]["sitemap"], "404 at /sitemap.xml");
}
