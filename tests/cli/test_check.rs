// Tests for `strictabc check`.
use crate::common::{run, write_project, MULTIPLE_ERRORS_PY};

const BASE_PY: &str = "\
from abcmeta import ABC, abstractmethod


class Shape(ABC):
    @abstractmethod
    def area(self) -> float: ...

    @abstractmethod
    def scale(self, factor: float) -> \"Shape\": ...
";

const GOOD_PY: &str = "\
from shapes.base import Shape


class Square(Shape):
    def area(self) -> float:
        return 1.0

    def scale(self, factor: float) -> \"Shape\":
        return self
";

const BAD_PY: &str = "\
from shapes.base import Shape


class Circle(Shape):
    def area(self) -> int:
        return 1
";

#[test]
fn test_clean_project_prints_nothing() {
    let dir = write_project(&[("shapes/base.py", BASE_PY), ("shapes/square.py", GOOD_PY)]);
    let out = run(&dir, &["check"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_cross_file_violations_are_reported() {
    let dir = write_project(&[("shapes/base.py", BASE_PY), ("shapes/circle.py", BAD_PY)]);
    let out = run(&dir, &["check"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("error: class 'Circle' breaks the contract of 'Shape'"));
    assert!(stdout.contains("--> [A002] area at shapes/circle.py:5"));
    assert!(stdout.contains("--> [A001] scale at shapes/circle.py:4"));
    assert!(stdout.contains("1: incorrect signature."));
    assert!(stdout.contains("2: incorrect implementation."));
    assert!(stdout.contains("2 finding(s) in 1 class(es)"));
}

#[test]
fn test_json_output() {
    let dir = write_project(&[("app.py", MULTIPLE_ERRORS_PY)]);
    let out = run(&dir, &["check", "--json"]);
    assert_eq!(out.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["command"], "check");
    assert_eq!(v["status"], "error");
    assert_eq!(v["files_analyzed"], serde_json::json!(["app.py"]));
    let codes: Vec<_> = v["reports"][0]["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["A001", "A005", "A004", "A002"]);
}

#[test]
fn test_check_specific_paths() {
    let dir = write_project(&[
        ("shapes/base.py", BASE_PY),
        ("shapes/circle.py", BAD_PY),
        ("other/app.py", MULTIPLE_ERRORS_PY),
    ]);
    let out = run(&dir, &["check", "other", "--json"]);
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["files_analyzed"], serde_json::json!(["other/app.py"]));
    assert_eq!(v["reports"][0]["subclass"], "ABCDerived");
}

#[test]
fn test_config_suppress_and_ignore_patterns() {
    let config = r#"{
  "version": "0.1.0",
  "ignore_patterns": ["legacy/**"],
  "suppress": ["A001"]
}"#;
    let dir = write_project(&[
        (".strictabc/strictabc.json", config),
        ("shapes/base.py", BASE_PY),
        ("shapes/circle.py", BAD_PY),
        ("legacy/app.py", MULTIPLE_ERRORS_PY),
    ]);
    let out = run(&dir, &["check", "--json"]);
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["suppressed"], 1);
    assert_eq!(v["reports"].as_array().unwrap().len(), 1);
    let findings = v["reports"][0]["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["code"], "A002");
    assert_eq!(findings[0]["number"], 1);
}

#[test]
fn test_strictabcignore_is_honoured() {
    let dir = write_project(&[
        (".strictabcignore", "vendor/\n"),
        ("vendor/app.py", MULTIPLE_ERRORS_PY),
    ]);
    let out = run(&dir, &["check"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn test_verbose_summary_goes_to_stderr() {
    let dir = write_project(&[("shapes/base.py", BASE_PY), ("shapes/square.py", GOOD_PY)]);
    let out = run(&dir, &["check", "--verbose"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("strictabc check: 2 file(s), 1 class(es) checked, 0 finding(s)"));
}
