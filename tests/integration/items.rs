//! Tests for the `items` command.

use predicates::prelude::*;
use serde_json::json;

use crate::common::{TestEnv, path_str, stdout_json};

#[test]
fn test_items_full_config() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();

    let output = env.cmd().arg("--config").arg(&config).arg("items").output().unwrap();
    let items = stdout_json(&output);
    let root = env.install_root();

    // Static discovery only exposes the first master.
    assert_eq!(items["master_location"], "10.0.0.1:2181");
    assert_eq!(items["master_priv_ipaddr"], "10.0.0.1");
    assert_eq!(items["zk_client_port"], "2181");
    assert_eq!(items["local_priv_ipaddr"], "10.0.0.5");
    assert_eq!(items["privateipaddr"], "10.0.0.5");

    assert_eq!(items["dcos_inst_dpath"], json!(path_str(&root, &[])));
    assert_eq!(items["dcos_log_dpath"], json!(path_str(&root, &["var", "log"])));
    assert_eq!(items["pkg_inst_dpath"], json!(path_str(&root, &["packages", "mesos--1.14.0"])));
    assert_eq!(items["pkg_shrcfg_dpath"], json!(path_str(&root, &["conf", "mesos"])));
    assert_eq!(items.as_object().unwrap().len(), 8 + 4 + 5 + 1);
}

#[test]
fn test_items_keep_source_order() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();

    let output = env.cmd().arg("--config").arg(&config).arg("items").output().unwrap();
    let items = stdout_json(&output);
    let keys: Vec<&str> = items.as_object().unwrap().keys().map(String::as_str).collect();

    assert_eq!(keys.first(), Some(&"dcos_inst_dpath"));
    assert_eq!(keys[8], "master_location");
    assert_eq!(keys[12], "pkg_inst_dpath");
    assert_eq!(keys.last(), Some(&"privateipaddr"));
}

#[test]
fn test_items_without_sources_is_empty() {
    let env = TestEnv::new().unwrap();

    env.cmd().arg("items").assert().success().stdout("{}\n");
}

#[test]
fn test_items_from_flags_only() {
    let env = TestEnv::new().unwrap();
    let root = env.install_root();

    let output = env
        .cmd()
        .arg("--root")
        .arg(&root)
        .args(["--pkg-id", "dcos-net--2.0", "items"])
        .output()
        .unwrap();
    let items = stdout_json(&output);

    assert_eq!(items["pkg_log_dpath"], json!(path_str(&root, &["var", "log", "dcos-net"])));
    assert!(items.get("master_location").is_none());
}

#[test]
fn test_items_set_overrides_computed_value() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();

    let output = env
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["--set", "dcos_log_dpath=D:/logs", "--set", "custom=a=b", "items"])
        .output()
        .unwrap();
    let items = stdout_json(&output);

    assert_eq!(items["dcos_log_dpath"], "D:/logs");
    assert_eq!(items["custom"], "a=b");
}

#[test]
fn test_items_set_privateipaddr_skips_detection() {
    let env = TestEnv::new().unwrap();
    let config = env.write_config(&panda_ctx::test_utils::ConfigFixture::cluster_only()).unwrap();

    let output = env
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["--set", "privateipaddr=192.168.1.20", "items"])
        .output()
        .unwrap();
    let items = stdout_json(&output);

    assert_eq!(items["local_priv_ipaddr"], "192.168.1.20");
    assert_eq!(items["master_location"], "10.0.0.1:2181");
}

#[test]
fn test_items_json_ready_escapes_values() {
    let env = TestEnv::new().unwrap();

    let output = env
        .cmd()
        .args(["--set", r#"motd=say "hi"\now"#, "items", "--json-ready"])
        .output()
        .unwrap();
    let items = stdout_json(&output);

    assert_eq!(items["motd"], r#"say \"hi\"\\now"#);

    let output = env.cmd().args(["--set", r#"motd=say "hi""#, "items"]).output().unwrap();
    assert_eq!(stdout_json(&output)["motd"], r#"say "hi""#);
}

#[test]
fn test_items_checksum() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();

    let run = |extra: &[&str]| {
        let output = env
            .cmd()
            .arg("--config")
            .arg(&config)
            .args(extra)
            .args(["items", "--checksum"])
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    };

    let first = run(&[]);
    assert!(first.starts_with("sha256:"));
    assert_eq!(first, run(&[]));
    assert_ne!(first, run(&["--set", "custom=1"]));
}

#[test]
fn test_items_config_from_env() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();

    env.cmd()
        .env("PANDA_CONFIG", &config)
        .arg("items")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"master_location\": \"10.0.0.1:2181\""));
}

#[cfg(target_os = "linux")]
#[test]
fn test_items_default_config_location() {
    let env = TestEnv::new().unwrap();
    let default_dir = env.path().join("config").join("panda");
    std::fs::create_dir_all(&default_dir).unwrap();
    std::fs::write(default_dir.join("context.toml"), "[extra]\nfrom_default = \"yes\"\n").unwrap();

    env.cmd()
        .arg("items")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"from_default\": \"yes\""));
}
