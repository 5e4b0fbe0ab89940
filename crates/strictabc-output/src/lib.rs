//! Output formatters for strictabc command results.
//!
//! - **Human** (default): numbered reports with source locations
//! - **JSON** (`--json`): machine-readable structured output

pub mod human;
pub mod json;

use strictabc_enforce::explain::ExplainResult;
use strictabc_enforce::types::CheckResult;

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_explain(&self, result: &ExplainResult) -> String;
}
