// Tests for `strictabc init`.
use std::fs;

use crate::common::{run, write_project};

#[test]
fn test_init_writes_default_config() {
    let dir = write_project(&[]);
    let out = run(&dir, &["init"]);
    assert!(out.status.success());

    let body = fs::read_to_string(dir.path().join(".strictabc/strictabc.json")).unwrap();
    let config: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(config["marker_modules"], serde_json::json!(["abcmeta"]));
    assert!(dir.path().join(".strictabcignore").exists());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = write_project(&[(".strictabc/strictabc.json", "{\"version\": \"custom\"}")]);
    let out = run(&dir, &["init"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    let body = fs::read_to_string(dir.path().join(".strictabc/strictabc.json")).unwrap();
    assert!(body.contains("custom"));
}

#[test]
fn test_init_force_overwrites_but_keeps_ignore_file() {
    let dir = write_project(&[
        (".strictabc/strictabc.json", "{\"version\": \"custom\"}"),
        (".strictabcignore", "generated/\n"),
    ]);
    let out = run(&dir, &["init", "--force"]);
    assert!(out.status.success());
    let body = fs::read_to_string(dir.path().join(".strictabc/strictabc.json")).unwrap();
    assert!(!body.contains("custom"));
    let ignore = fs::read_to_string(dir.path().join(".strictabcignore")).unwrap();
    assert_eq!(ignore, "generated/\n");
}
