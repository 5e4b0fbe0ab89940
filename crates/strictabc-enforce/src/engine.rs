use std::collections::HashMap;

use strictabc_core::class::ClassDef;
use strictabc_core::config::StrictConfig;

use crate::suppress::SuppressionManager;
use crate::types::{CheckResult, ValidationReport};
use crate::validate::validate;

/// Holds the class tables of a project and validates every subclass.
///
/// Classes are kept in registration order. A subclass is checked against the
/// class its `parent` name resolves to: the closest preceding definition in
/// the same file, otherwise the last registered class of that name from
/// another file. A same-file class defined after the subclass is never a
/// candidate. Classes whose parent is unknown (external bases such as `ABC`
/// or `object`) are not checked.
#[derive(Debug, Default)]
pub struct ContractEngine {
    classes: Vec<ClassDef>,
    by_name: HashMap<String, Vec<usize>>,
    files: Vec<String>,
    suppressions: SuppressionManager,
}

impl ContractEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine configured from a `StrictConfig`.
    pub fn with_config(config: &StrictConfig) -> Self {
        let mut engine = Self::new();
        for code in &config.suppress {
            engine.suppress(code);
        }
        engine
    }

    pub fn suppress(&mut self, code: &str) {
        self.suppressions.suppress(code);
    }

    pub fn register(&mut self, class: ClassDef) {
        self.by_name
            .entry(class.name.clone())
            .or_default()
            .push(self.classes.len());
        self.classes.push(class);
    }

    /// Register every class of one source file.
    pub fn register_file(&mut self, path: &str, classes: Vec<ClassDef>) {
        self.files.push(path.to_string());
        for class in classes {
            self.register(class);
        }
    }

    pub fn classes(&self) -> &[ClassDef] {
        &self.classes
    }

    /// The most recently registered class with this name.
    pub fn get(&self, name: &str) -> Option<&ClassDef> {
        self.by_name
            .get(name)
            .and_then(|ids| ids.last())
            .map(|&i| &self.classes[i])
    }

    fn resolve_parent(&self, child_idx: usize) -> Option<&ClassDef> {
        let child = &self.classes[child_idx];
        let parent_name = child.parent.as_deref()?;
        let candidates = self.by_name.get(parent_name)?;
        let child_file = self.file_of(child_idx);

        let same_file_before = candidates
            .iter()
            .rev()
            .find(|&&i| i < child_idx && self.file_of(i) == child_file);
        same_file_before
            .or_else(|| candidates.iter().rev().find(|&&i| self.file_of(i) != child_file))
            .map(|&i| &self.classes[i])
    }

    fn file_of(&self, idx: usize) -> Option<&str> {
        self.classes[idx].location.as_ref().map(|l| l.file.as_str())
    }

    /// Validate every subclass whose parent is known.
    pub fn check(&self) -> CheckResult {
        let mut reports: Vec<ValidationReport> = Vec::new();
        let mut classes_checked = 0u32;
        let mut suppressed = 0u32;

        for idx in 0..self.classes.len() {
            let Some(parent) = self.resolve_parent(idx) else {
                continue;
            };
            classes_checked += 1;
            let mut report = validate(parent, &self.classes[idx]);
            suppressed += self.suppressions.apply(&mut report);
            if !report.is_empty() {
                reports.push(report);
            }
        }

        tracing::debug!(
            classes = self.classes.len(),
            checked = classes_checked,
            failing = reports.len(),
            suppressed,
            "check complete"
        );

        CheckResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: if reports.is_empty() { "ok" } else { "error" }.to_string(),
            files_analyzed: self.files.clone(),
            classes_checked,
            reports,
            suppressed,
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
