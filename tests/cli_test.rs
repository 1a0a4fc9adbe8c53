use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run namewatch with a clean credential environment.
fn namewatch() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("namewatch");
    cmd.env_remove("TWITTER_BEARER_TOKEN")
        .env_remove("TARGET_USER_ID")
        .env_remove("NAMEWATCH_API_HOST");
    cmd
}

const SAMPLE_LOG: &str = "\
[2026-01-05T10:00:00Z] 42 changed from alice to bob
[2026-02-10T10:00:00Z] 7 changed from carol to dave
[2026-03-15T10:00:00Z] 42 changed from bob to alice
";

// ─── Init ────────────────────────────────────────────────────────

#[test]
fn init_creates_config_and_gitignore() {
    let dir = assert_fs::TempDir::new().unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    let config = std::fs::read_to_string(dir.path().join(".namewatch/config.toml")).unwrap();
    assert!(config.contains("[watch]"));
    assert!(config.contains("username_changes.log"));

    let gitignore = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
    assert!(gitignore.lines().any(|l| l == ".env"));
}

#[test]
fn init_twice_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    namewatch().current_dir(dir.path()).arg("init").assert().success();
    namewatch()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_keeps_existing_gitignore_entries() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".gitignore").write_str("target/\n.env\n").unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(".env already in .gitignore"));

    let gitignore = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
    assert_eq!(gitignore, "target/\n.env\n");
}

#[test]
fn init_respects_custom_config_dir() {
    let dir = assert_fs::TempDir::new().unwrap();

    namewatch()
        .current_dir(dir.path())
        .args(["init", "--config", "watchcfg"])
        .assert()
        .success();

    assert!(dir.path().join("watchcfg/config.toml").exists());
}

// ─── Log ─────────────────────────────────────────────────────────

#[test]
fn log_shows_entries() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("username_changes.log").write_str(SAMPLE_LOG).unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entries"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("dave"));
}

#[test]
fn log_filters_by_entity() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("username_changes.log").write_str(SAMPLE_LOG).unwrap();

    namewatch()
        .current_dir(dir.path())
        .args(["log", "--entity", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries"))
        .stdout(predicate::str::contains("carol"))
        .stdout(predicate::str::contains("alice").not());
}

#[test]
fn log_filters_by_since() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("username_changes.log").write_str(SAMPLE_LOG).unwrap();

    namewatch()
        .current_dir(dir.path())
        .args(["log", "--since", "2026-02-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries"));
}

#[test]
fn log_last_limits_entries() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("username_changes.log").write_str(SAMPLE_LOG).unwrap();

    namewatch()
        .current_dir(dir.path())
        .args(["log", "--last", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries"))
        .stdout(predicate::str::contains("2026-03-15"))
        .stdout(predicate::str::contains("2026-01-05").not());
}

#[test]
fn log_reads_configured_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".namewatch/config.toml")
        .write_str("[audit]\nlog_file = \"custom.log\"\n")
        .unwrap();
    dir.child("custom.log").write_str(SAMPLE_LOG).unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entries"));
}

#[test]
fn log_empty_no_entries() {
    let dir = assert_fs::TempDir::new().unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes recorded"));

    // Reading never creates the log
    assert!(!dir.path().join("username_changes.log").exists());
}

#[test]
fn log_invalid_since_date_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    namewatch()
        .current_dir(dir.path())
        .args(["log", "--since", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

// ─── Status ──────────────────────────────────────────────────────

#[test]
fn status_without_anything_configured() {
    let dir = assert_fs::TempDir::new().unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("none (defaults)"))
        .stdout(predicate::str::contains("TWITTER_BEARER_TOKEN is missing"))
        .stdout(predicate::str::contains("No accounts configured"))
        .stdout(predicate::str::contains("not created yet"));
}

#[test]
fn status_shows_resolved_settings() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".env")
        .write_str("TWITTER_BEARER_TOKEN=abc\nTARGET_USER_ID=42,7\n")
        .unwrap();
    dir.child("username_changes.log").write_str(SAMPLE_LOG).unwrap();

    namewatch()
        .current_dir(dir.path())
        .args(["status", "--field", "name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TWITTER_BEARER_TOKEN is set"))
        .stdout(predicate::str::contains("abc").not())
        .stdout(predicate::str::contains("• 42"))
        .stdout(predicate::str::contains("• 7"))
        .stdout(predicate::str::is_match(r"Field: \S*name").unwrap())
        .stdout(predicate::str::contains("3 change(s) recorded"));
}

#[test]
fn status_rejects_bad_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".namewatch/config.toml")
        .write_str("[audit]\nlog_file = \"../outside.log\"\n")
        .unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("relative path"));
}

#[test]
fn status_reports_zero_interval_as_single_poll() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".namewatch/config.toml")
        .write_str("[watch]\ninterval_secs = 0\n")
        .unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("single poll"))
        .stdout(predicate::str::contains("Interval: 0s").not());
}

#[test]
fn status_accepts_display_name_field_in_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".namewatch/config.toml")
        .write_str("[watch]\nfield = \"display_name\"\n")
        .unwrap();

    namewatch()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Field: \S*name").unwrap());
}
