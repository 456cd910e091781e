//! Tests for the `render` command.

use predicates::prelude::*;
use std::fs;

use crate::common::{TestEnv, path_str};

#[test]
fn test_render_to_stdout() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();
    let template = env
        .write_file("mesos.env.tmpl", "MESOS_ZK=zk://{{ master_location }}/mesos\nIP={{ local_priv_ipaddr }}\n")
        .unwrap();

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("render")
        .arg(&template)
        .assert()
        .success()
        .stdout("MESOS_ZK=zk://10.0.0.1:2181/mesos\nIP=10.0.0.5\n");
}

#[test]
fn test_render_to_output_file_creates_parents() {
    let env = TestEnv::new().unwrap();
    let config = env.write_full_config().unwrap();
    let template = env.write_file("log.tmpl", "{{ pkg_log_dpath }}").unwrap();
    let output = env.path().join("out").join("nested").join("log.conf");

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("render")
        .arg(&template)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    let rendered = fs::read_to_string(&output).unwrap();
    assert_eq!(rendered, path_str(&env.install_root(), &["var", "log", "mesos"]));
}

#[test]
fn test_render_json_ready_produces_valid_json() {
    let env = TestEnv::new().unwrap();
    let template = env.write_file("conf.json.tmpl", r#"{"banner": "{{ banner }}"}"#).unwrap();

    let output = env
        .cmd()
        .args(["--set", r#"banner=C:\d2iq "dcos""#, "render", "--json-ready"])
        .arg(&template)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["banner"], r#"C:\d2iq "dcos""#);
}

#[test]
fn test_render_undefined_variable_fails() {
    let env = TestEnv::new().unwrap();
    let template = env.write_file("bad.tmpl", "{{ no_such_item }}").unwrap();

    env.cmd()
        .arg("render")
        .arg(&template)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Template rendering failed"))
        .stderr(predicate::str::contains("panda-ctx items"));
}

#[test]
fn test_render_missing_template_fails() {
    let env = TestEnv::new().unwrap();

    env.cmd()
        .args(["render", "missing.tmpl"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read template"));
}
