// Explicit subclass definition through Derive / SubclassBuilder.
use strictabc_core::class::MethodDecl;
use strictabc_enforce::define::{ContractError, Derive};

use crate::common::{abc_parent, good_child, typed};

#[test]
fn test_define_produces_class_when_valid() {
    let parent = abc_parent();
    let mut builder = parent.derive("ABCDerived").at("app.py", 30);
    for member in good_child().members {
        builder = builder.member(member);
    }
    let class = builder.define().unwrap();
    assert_eq!(class.parent.as_deref(), Some("ABCParent"));
    assert_eq!(class.location.unwrap().line, 30);
}

#[test]
fn test_define_fails_with_full_report() {
    let parent = abc_parent();
    let err = parent
        .derive("ABCDerived")
        .method(typed("method_5", "name", "str"))
        .define()
        .unwrap_err();
    let ContractError::Violations(report) = &err else {
        panic!("expected violations, got {err:?}");
    };
    let codes: Vec<_> = report.findings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec!["A001", "A001", "A001", "A002"]);
    assert_eq!(err.to_string(), report.render());
}

#[test]
fn test_redeclared_override_uses_last_value() {
    let parent = abc_parent();
    let mut builder = parent.derive("ABCDerived");
    for member in good_child().members {
        builder = builder.member(member);
    }
    let err = builder
        .method(MethodDecl::new("method_1").receiver("self").untyped("name"))
        .define()
        .unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].code, "A003");
}
