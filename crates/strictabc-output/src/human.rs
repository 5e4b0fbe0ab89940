use crate::OutputFormatter;
use strictabc_core::class::Location;
use strictabc_enforce::explain::ExplainResult;
use strictabc_enforce::types::{CheckResult, ValidationReport};

pub struct HumanFormatter;

fn format_location(location: Option<&Location>) -> String {
    match location {
        Some(l) => format!("{}:{}", l.file, l.line),
        None => "<unknown>".to_string(),
    }
}

fn format_report(report: &ValidationReport) -> String {
    let mut out = format!(
        "error: class '{}' breaks the contract of '{}'\n",
        report.subclass, report.parent,
    );
    for f in &report.findings {
        out.push_str(&format!(
            "  --> [{}] {} at {}\n",
            f.code,
            f.method,
            format_location(f.location.as_ref()),
        ));
    }
    out.push('\n');
    out.push_str(&report.render());
    out.push_str("\n\n");
    out
}

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        if result.is_clean() {
            return String::new(); // Clean check = empty stdout
        }

        let mut out = String::new();
        for report in &result.reports {
            out.push_str(&format_report(report));
        }

        out.push_str(&format!(
            "{} finding(s) in {} class(es); {} class(es) checked in {} file(s)",
            result.finding_count(),
            result.reports.len(),
            result.classes_checked,
            result.files_analyzed.len(),
        ));
        if result.suppressed > 0 {
            out.push_str(&format!(", {} suppressed", result.suppressed));
        }
        out.push('\n');
        out
    }

    fn format_explain(&self, result: &ExplainResult) -> String {
        format!(
            "{}: {} ({})\n\n{}\n\n  fix: {}\n",
            result.code, result.title, result.category, result.description, result.fix_hint,
        )
    }
}
