use assert_cmd::Command;
use predicates::prelude::*;

fn fund_release() -> Command {
    let mut cmd = Command::cargo_bin("fund_release").unwrap();
    cmd.env_remove("RELEASE_STORE_PASSWORD")
        .env_remove("RELEASE_KEY_PASSWORD")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn silent_without_config_fails_with_guidance() {
    let dir = tempfile::tempdir().unwrap();

    fund_release()
        .args(["silent", "--project-dir"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config"))
        .stderr(predicate::str::contains("fund_release interactive"));
}

#[test]
fn show_redacts_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join(".release");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{
  "keystorePath": "/keys/release.jks",
  "storePassword": "hunter2",
  "keyAlias": "release",
  "keyPassword": "swordfish"
}"#,
    )
    .unwrap();

    fund_release()
        .args(["show", "--project-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("keyAlias: release"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("hunter2").not())
        .stdout(predicate::str::contains("swordfish").not());
}

#[test]
fn ci_with_missing_keystore_fails_before_any_step() {
    let dir = tempfile::tempdir().unwrap();

    fund_release()
        .args(["ci", "--keystore", "missing.jks", "--key-alias", "release"])
        .args(["--store-password", "s", "--key-password", "k", "--project-dir"])
        .arg(dir.path())
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Keystore not found"));
    assert!(!dir.path().join("node_modules").exists());
}

#[test]
fn unknown_artifact_is_rejected() {
    fund_release()
        .args(["silent", "--artifact", "ipa"])
        .assert()
        .failure();
}
