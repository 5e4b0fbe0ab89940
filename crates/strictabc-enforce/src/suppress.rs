use std::collections::HashSet;

use crate::types::ValidationReport;

/// Manages suppressed finding codes.
///
/// Suppressed findings are removed from a report and the remaining findings
/// are renumbered from 1. The number removed is returned so callers can
/// surface it in summaries.
#[derive(Debug, Default)]
pub struct SuppressionManager {
    suppressed_codes: HashSet<String>,
}

impl SuppressionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code to suppress (e.g., "A004").
    pub fn suppress(&mut self, code: &str) {
        self.suppressed_codes.insert(code.to_string());
    }

    pub fn is_suppressed(&self, code: &str) -> bool {
        self.suppressed_codes.contains(code)
    }

    /// Remove suppressed findings from `report`. Returns how many were removed.
    pub fn apply(&self, report: &mut ValidationReport) -> u32 {
        if self.suppressed_codes.is_empty() {
            return 0;
        }
        let before = report.len();
        report.retain(|f| !self.is_suppressed(&f.code));
        (before - report.len()) as u32
    }

    /// Number of active suppressions.
    pub fn count(&self) -> usize {
        self.suppressed_codes.len()
    }
}
