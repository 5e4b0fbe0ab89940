use serde::{Deserialize, Serialize};

use crate::types::{
    CODE_ARITY, CODE_MISSING_OVERRIDE, CODE_PARAMETER_NAME, CODE_PARAMETER_TYPE, CODE_RETURN_TYPE,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResult {
    pub version: String,
    pub command: String,
    pub code: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub fix_hint: String,
}

struct CodeInfo {
    code: &'static str,
    title: &'static str,
    category: &'static str,
    description: &'static str,
    fix_hint: &'static str,
}

const CATALOGUE: &[CodeInfo] = &[
    CodeInfo {
        code: CODE_MISSING_OVERRIDE,
        title: "missing override",
        category: "missing_override",
        description: "The subclass does not define a method that its immediate parent \
                      marks as restricted-abstract. Inherited definitions and plain \
                      attributes with the same name do not count.",
        fix_hint: "Define the method directly on the subclass with the parent's signature.",
    },
    CodeInfo {
        code: CODE_RETURN_TYPE,
        title: "return type differs",
        category: "return_type",
        description: "The override declares a different return annotation than the \
                      parent. A missing annotation is treated as `Any`.",
        fix_hint: "Use the parent's return annotation exactly.",
    },
    CodeInfo {
        code: CODE_ARITY,
        title: "parameter count differs",
        category: "arity",
        description: "The override takes a different number of parameters than the \
                      parent. The receiver (`self`/`cls`) is counted only when one \
                      side lacks it, as with a `@staticmethod` override.",
        fix_hint: "Add or remove parameters so the override matches the parent.",
    },
    CodeInfo {
        code: CODE_PARAMETER_NAME,
        title: "parameter name differs",
        category: "parameter_name",
        description: "A parameter at the reported position (0-based, receiver \
                      excluded), or the receiver itself, has a different name than \
                      in the parent.",
        fix_hint: "Rename the parameter to the parent's name.",
    },
    CodeInfo {
        code: CODE_PARAMETER_TYPE,
        title: "parameter type differs",
        category: "parameter_type",
        description: "A parameter has the parent's name but a different type \
                      annotation. A missing annotation is treated as `Any`.",
        fix_hint: "Use the parent's annotation for this parameter.",
    },
];

/// Describe a finding code. Lookup is case-insensitive.
pub fn explain(code: &str) -> Option<ExplainResult> {
    let info = CATALOGUE
        .iter()
        .find(|i| i.code.eq_ignore_ascii_case(code.trim()))?;
    Some(ExplainResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "explain".to_string(),
        code: info.code.to_string(),
        title: info.title.to_string(),
        category: info.category.to_string(),
        description: info.description.to_string(),
        fix_hint: info.fix_hint.to_string(),
    })
}

/// All known finding codes in order.
pub fn known_codes() -> Vec<&'static str> {
    CATALOGUE.iter().map(|i| i.code).collect()
}
