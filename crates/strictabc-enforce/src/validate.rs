use strictabc_core::class::{ClassDef, Member};
use strictabc_core::hash::shape_hash;

use crate::compare::compare;
use crate::diff;
use crate::extract::extract;
use crate::types::{Finding, ValidationReport};

/// Validate `subclass` against the restricted-abstract methods of `parent`.
///
/// Only members declared directly on `parent` are scanned, in declaration
/// order. A method missing from the subclass (or shadowed there by a
/// non-callable attribute) yields a missing-override finding and no
/// signature check. An empty report means the subclass is valid.
pub fn validate(parent: &ClassDef, subclass: &ClassDef) -> ValidationReport {
    let _span = tracing::debug_span!(
        "validate",
        parent = %parent.name,
        subclass = %subclass.name
    )
    .entered();

    let mut report = ValidationReport::new(&parent.name, &subclass.name);

    for member in &parent.members {
        let Member::Method(expected_decl) = member else {
            continue;
        };
        if !expected_decl.markers.is_restricted_abstract() {
            continue;
        }

        let actual_decl = match subclass.member(&expected_decl.name) {
            Some(Member::Method(m)) => m,
            Some(Member::Attribute { .. }) | None => {
                tracing::debug!(method = %expected_decl.name, "override missing");
                report.push(
                    Finding::missing_override(&subclass.name, &parent.name, &expected_decl.name)
                        .with_location(subclass.location.clone()),
                );
                continue;
            }
        };

        let expected = extract(expected_decl);
        let actual = extract(actual_decl);
        let Some(discrepancy) = compare(&expected, &actual) else {
            tracing::trace!(method = %expected_decl.name, "signature matches");
            continue;
        };

        tracing::debug!(
            method = %expected_decl.name,
            code = discrepancy.code(),
            "signature mismatch"
        );
        let diff_text = diff::render(&expected.rendered, &actual.rendered);
        report.push(
            Finding::signature_mismatch(&expected_decl.name, discrepancy, diff_text)
                .with_hashes(shape_hash(&expected), shape_hash(&actual))
                .with_location(
                    actual_decl
                        .location
                        .clone()
                        .or_else(|| subclass.location.clone()),
                ),
        );
    }

    report
}
