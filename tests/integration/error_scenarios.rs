//! Failure handling: exit codes and user-facing messages.

use panda_ctx::test_utils::ConfigFixture;
use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn test_invalid_config_syntax() {
    let env = TestEnv::new().unwrap();
    let config = env.write_config(&ConfigFixture::invalid_syntax()).unwrap();

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("items")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid context configuration"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_unknown_config_table() {
    let env = TestEnv::new().unwrap();
    let config = env.write_file("typo.toml", "[clutser.master-node-1]\nprivateipaddr = \"10.0.0.1\"\n").unwrap();

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("dump")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid context configuration"));
}

#[test]
fn test_missing_explicit_config() {
    let env = TestEnv::new().unwrap();

    env.cmd()
        .args(["--config", "does-not-exist.toml", "items"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read context configuration"));
}

#[test]
fn test_invalid_pkg_id_flag() {
    let env = TestEnv::new().unwrap();

    env.cmd()
        .args(["--pkg-id", "mesos", "items"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid package id"));
}

#[test]
fn test_invalid_set_flag() {
    let env = TestEnv::new().unwrap();

    env.cmd()
        .args(["--set", "novalue", "items"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let env = TestEnv::new().unwrap();

    env.cmd().args(["--verbose", "--quiet", "items"]).assert().failure().code(2);
}

#[cfg(unix)]
#[test]
fn test_missing_detection_script() {
    if std::path::Path::new(panda_ctx::utils::platform::UNIX_DETECT_IP_COMMAND[0]).exists() {
        return;
    }
    let env = TestEnv::new().unwrap();
    let config = env.write_config(&ConfigFixture::cluster_only()).unwrap();

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("items")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("address detection command"))
        .stderr(predicate::str::contains("privateipaddr"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();

    env.cmd()
        .arg("--verbose")
        .arg("--config")
        .arg(&config)
        .arg("items")
        .assert()
        .success()
        .stdout(predicate::str::contains("master_location"))
        .stderr(predicate::str::contains("Resource context sources"));
}

#[test]
fn test_set_without_local_address_with_cluster_config() {
    let env = TestEnv::new().unwrap();
    let config = env.write_config(&ConfigFixture::cluster_only()).unwrap();

    env.cmd()
        .arg("--config")
        .arg(&config)
        .args(["--set", "custom=1", "items"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("do not contain 'privateipaddr'"))
        .stderr(predicate::str::contains("--set privateipaddr="));
}
