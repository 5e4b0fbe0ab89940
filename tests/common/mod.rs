//! Shared test helpers for strictabc integration tests.
//!
//! Import from any integration test file with:
//!   `#[path = "common/mod.rs"] mod common;`
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use strictabc_core::class::{ClassDef, MethodDecl};
use tempfile::TempDir;

/// A method on the shared fixture: `(self, <first>: str, age: int) -> <ret>`.
#[allow(dead_code)]
pub fn typed(name: &str, first: &str, ret: &str) -> MethodDecl {
    MethodDecl::new(name)
        .receiver("self")
        .param(first, "str")
        .param("age", "int")
        .returns(ret)
}

/// Parent with four restricted-abstract methods and one concrete one.
#[allow(dead_code)]
pub fn abc_parent() -> ClassDef {
    ClassDef::builder("ABCParent")
        .abstract_method(
            MethodDecl::new("method_1")
                .receiver("self")
                .untyped("name")
                .untyped("age"),
        )
        .abstract_method(typed("method_2", "name", "Dict[str, str]"))
        .method(MethodDecl::new("method_3").receiver("self"))
        .abstract_method(typed("method_4", "name", "Tuple[str, str]"))
        .abstract_method(typed("method_5", "name", "Tuple[str, str]"))
        .build()
}

/// A subclass that satisfies [`abc_parent`].
#[allow(dead_code)]
pub fn good_child() -> ClassDef {
    ClassDef::builder("ABCDerived")
        .parent("ABCParent")
        .method(
            MethodDecl::new("method_1")
                .receiver("self")
                .untyped("name")
                .untyped("age"),
        )
        .method(typed("method_2", "name", "Dict[str, str]"))
        .method(typed("method_4", "name", "Tuple[str, str]"))
        .method(typed("method_5", "name", "Tuple[str, str]"))
        .build()
}

/// Python module with the same hierarchy as [`abc_parent`] and a subclass
/// that gets four things wrong.
#[allow(dead_code)]
pub const MULTIPLE_ERRORS_PY: &str = r#""""Test for multiple errors."""
from typing import Dict, Text, Tuple

from abcmeta import ABC, abstractmethod


class ABCParent(ABC):
    @abstractmethod
    def method_1(self, name, age):
        pass

    @abstractmethod
    def method_2(self, name: Text, age: int) -> Dict[Text, Text]:
        """Abstract method."""

    def method_3(self):
        pass

    @abstractmethod
    def method_4(self, name: Text, age: int) -> Tuple[Text, Text]:
        """Abstract method."""

    @abstractmethod
    def method_5(self, name: Text, age: int) -> Tuple[Text, Text]:
        """Abstract method."""


class ABCDerived(ABCParent):
    def method_(self, name, age):
        pass

    def method_2(self, name: int, age: int) -> Dict[Text, Text]:
        return {"name": "test"}

    def method_4(self, family: Text, age: int) -> Tuple[Text, Text]:
        return ("name", "test")

    def method_5(self, name: Text, age: int) -> str:
        """Abstract method."""
"#;

/// Create a temp project containing `files`.
#[allow(dead_code)]
pub fn write_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
    }
    dir
}

/// Path to the built `strictabc` binary, building it when missing.
#[allow(dead_code)]
pub fn strictabc_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("strictabc");
    if path.exists() {
        return path;
    }
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = workspace.join("target/debug/strictabc");
    if fallback.exists() {
        return fallback;
    }
    let status = Command::new("cargo")
        .args(["build", "-p", "strictabc-cli"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build strictabc");
    assert!(status.success(), "Failed to build strictabc binary");
    fallback
}

/// Run the binary inside `dir` with logging pinned off.
#[allow(dead_code)]
pub fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(strictabc_bin())
        .args(args)
        .current_dir(dir.path())
        .env("STRICTABC_LOG", "off")
        .output()
        .unwrap()
}
