use std::fmt;

use serde::{Deserialize, Serialize};
use strictabc_core::class::Location;
use strictabc_core::types::TypeRef;

pub const CODE_MISSING_OVERRIDE: &str = "A001";
pub const CODE_RETURN_TYPE: &str = "A002";
pub const CODE_ARITY: &str = "A003";
pub const CODE_PARAMETER_NAME: &str = "A004";
pub const CODE_PARAMETER_TYPE: &str = "A005";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    MissingOverride,
    SignatureMismatch,
}

/// The first structural difference between two signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Discrepancy {
    ReturnType {
        expected: TypeRef,
        actual: TypeRef,
    },
    Arity {
        expected: usize,
        actual: usize,
    },
    /// The receiver (`self`, `cls`) is named differently. Reported as A004.
    ReceiverName {
        expected: String,
        actual: String,
    },
    ParameterName {
        position: usize,
        expected: String,
        actual: String,
    },
    ParameterType {
        position: usize,
        name: String,
        expected: TypeRef,
        actual: TypeRef,
    },
}

impl Discrepancy {
    pub fn code(&self) -> &'static str {
        match self {
            Discrepancy::ReturnType { .. } => CODE_RETURN_TYPE,
            Discrepancy::Arity { .. } => CODE_ARITY,
            Discrepancy::ReceiverName { .. } | Discrepancy::ParameterName { .. } => {
                CODE_PARAMETER_NAME
            }
            Discrepancy::ParameterType { .. } => CODE_PARAMETER_TYPE,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Discrepancy::ReturnType { .. } => "return_type",
            Discrepancy::Arity { .. } => "arity",
            Discrepancy::ReceiverName { .. } | Discrepancy::ParameterName { .. } => {
                "parameter_name"
            }
            Discrepancy::ParameterType { .. } => "parameter_type",
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::ReturnType { expected, actual } => write!(
                f,
                "Derived method expected to return in '{expected}' type, but returns '{actual}'"
            ),
            Discrepancy::Arity { expected, actual } => write!(
                f,
                "Derived method expected to get {expected} parameters but gets {actual}"
            ),
            Discrepancy::ReceiverName { expected, actual } => write!(
                f,
                "Derived method expected to get '{expected}' as its receiver, but gets '{actual}'"
            ),
            Discrepancy::ParameterName {
                position,
                expected,
                actual,
            } => write!(
                f,
                "Derived method expected to get '{expected}' parameter at position {position}, but gets '{actual}'"
            ),
            Discrepancy::ParameterType {
                name,
                expected,
                actual,
                ..
            } => write!(
                f,
                "Derived method expected to get '{name}: {expected}' parameter's type, but gets '{name}: {actual}'"
            ),
        }
    }
}

/// One reported problem. `number` is assigned by the owning report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub number: u32,
    pub code: String,
    pub kind: FindingKind,
    pub method: String,
    /// Finding text without the number prefix.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discrepancy: Option<Discrepancy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hash: Option<String>,
    /// Where the offending declaration lives (subclass side).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Finding {
    pub fn missing_override(subclass: &str, parent: &str, method: &str) -> Self {
        Self {
            number: 0,
            code: CODE_MISSING_OVERRIDE.to_string(),
            kind: FindingKind::MissingOverride,
            method: method.to_string(),
            message: format!(
                "incorrect implementation.\nDerived class '{subclass}' has not implemented '{method}' method of the parent class '{parent}'"
            ),
            discrepancy: None,
            diff: None,
            expected_hash: None,
            actual_hash: None,
            location: None,
        }
    }

    pub fn signature_mismatch(method: &str, discrepancy: Discrepancy, diff: Option<String>) -> Self {
        let mut message =
            String::from("incorrect signature.\nSignature of the derived method is not the same as parent class:\n");
        if let Some(d) = &diff {
            message.push_str(d);
            message.push('\n');
        }
        message.push_str(&discrepancy.to_string());
        Self {
            number: 0,
            code: discrepancy.code().to_string(),
            kind: FindingKind::SignatureMismatch,
            method: method.to_string(),
            message,
            discrepancy: Some(discrepancy),
            diff,
            expected_hash: None,
            actual_hash: None,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    pub fn with_hashes(mut self, expected: String, actual: String) -> Self {
        self.expected_hash = Some(expected);
        self.actual_hash = Some(actual);
        self
    }

    pub fn render(&self) -> String {
        format!("{}: {}", self.number, self.message)
    }
}

/// All findings for one subclass definition, in parent declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub parent: String,
    pub subclass: String,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new(parent: &str, subclass: &str) -> Self {
        Self {
            parent: parent.to_string(),
            subclass: subclass.to_string(),
            findings: Vec::new(),
        }
    }

    /// Append a finding, numbering it after the ones already recorded.
    pub fn push(&mut self, mut finding: Finding) {
        finding.number = self.findings.len() as u32 + 1;
        self.findings.push(finding);
    }

    /// Drop findings rejected by `keep` and renumber the rest from 1.
    pub fn retain(&mut self, mut keep: impl FnMut(&Finding) -> bool) {
        self.findings.retain(|f| keep(f));
        for (i, f) in self.findings.iter_mut().enumerate() {
            f.number = i as u32 + 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Numbered findings separated by a blank line.
    pub fn render(&self) -> String {
        self.findings
            .iter()
            .map(Finding::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Result of checking every subclass in a class table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error"
    pub files_analyzed: Vec<String>,
    pub classes_checked: u32,
    /// Reports with at least one finding.
    pub reports: Vec<ValidationReport>,
    pub suppressed: u32,
}

impl CheckResult {
    pub fn finding_count(&self) -> usize {
        self.reports.iter().map(ValidationReport::len).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.reports.is_empty()
    }
}
