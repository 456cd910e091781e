//! Tests for the `dump` command.

use serde_json::json;

use crate::common::{TestEnv, path_str, stdout_json};

#[test]
fn test_dump_full_config() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();

    let output = env.cmd().arg("--config").arg(&config).arg("dump").output().unwrap();
    let dict = stdout_json(&output);
    let root = env.install_root();

    assert_eq!(dict["istor_nodes"]["root"], json!(path_str(&root, &[])));
    assert_eq!(dict["istor_nodes"]["pkgrepo"], json!(path_str(&root, &["packages"])));
    assert_eq!(dict["pkg_id"], "mesos--1.14.0");
    assert_eq!(dict["cluster_conf"]["master-node-1"]["zookeeperclientport"], "2181");
    assert_eq!(dict["cluster_conf"]["discovery"]["type"], "static");
    assert_eq!(dict["extra_values"], json!({"privateipaddr": "10.0.0.5"}));
}

#[test]
fn test_dump_does_not_resolve_local_address() {
    let env = TestEnv::new().unwrap();
    let config = env.write_config(&panda_ctx::test_utils::ConfigFixture::cluster_only()).unwrap();

    // No override and no detection script: dumping must still succeed.
    let output = env.cmd().arg("--config").arg(&config).arg("dump").output().unwrap();
    let dict = stdout_json(&output);

    assert_eq!(dict["cluster_conf"]["master-node-1"]["privateipaddr"], "10.0.0.1");
    assert!(dict["istor_nodes"].is_null());
    assert!(dict["pkg_id"].is_null());
    assert!(dict["extra_values"].is_null());
}

#[test]
fn test_dump_set_initializes_extra_values() {
    let env = TestEnv::new().unwrap();

    let output = env.cmd().args(["--set", "a=1", "--set", "a=2", "dump"]).output().unwrap();
    let dict = stdout_json(&output);

    assert_eq!(dict["extra_values"], json!({"a": "2"}));
}
