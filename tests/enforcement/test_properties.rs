// Determinism, ordering, single-cause, soundness and completeness of validation.
use strictabc_core::class::{ClassDef, Member, MethodDecl};
use strictabc_enforce::types::{Discrepancy, FindingKind};
use strictabc_enforce::validate::validate;

use crate::common::{abc_parent, good_child, typed};

fn parent_one(decl: MethodDecl) -> ClassDef {
    ClassDef::builder("P").abstract_method(decl).build()
}

fn child_one(decl: MethodDecl) -> ClassDef {
    ClassDef::builder("C").parent("P").method(decl).build()
}

fn base() -> MethodDecl {
    MethodDecl::new("m")
        .receiver("self")
        .param("a", "int")
        .param("b", "str")
        .returns("bool")
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let child = ClassDef::builder("ABCDerived")
        .parent("ABCParent")
        .method(typed("method_2", "name", "Dict[str, int]"))
        .method(typed("method_4", "family", "Tuple[str, str]"))
        .build();
    let parent = abc_parent();
    let first = validate(&parent, &child).render();
    for _ in 0..10 {
        assert_eq!(validate(&parent, &child).render(), first);
    }
}

#[test]
fn test_order_follows_parent_not_subclass() {
    let parent = abc_parent();
    let mut reversed = ClassDef::builder("ABCDerived").parent("ABCParent");
    for method in ["method_5", "method_4", "method_2"] {
        reversed = reversed.method(typed(method, "wrong", "Tuple[str, str]"));
    }
    let report = validate(&parent, &reversed.build());
    let methods: Vec<_> = report.findings.iter().map(|f| f.method.as_str()).collect();
    assert_eq!(methods, vec!["method_1", "method_2", "method_4", "method_5"]);
    let numbers: Vec<_> = report.findings.iter().map(|f| f.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn test_multiple_defects_yield_one_finding() {
    // Wrong return, wrong arity and wrong name at once: return type wins.
    let child = child_one(
        MethodDecl::new("m")
            .receiver("self")
            .param("x", "int")
            .returns("int"),
    );
    let report = validate(&parent_one(base()), &child);
    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].code, "A002");

    // Same return, wrong arity and wrong name: arity wins.
    let child = child_one(
        MethodDecl::new("m")
            .receiver("self")
            .param("x", "int")
            .returns("bool"),
    );
    let report = validate(&parent_one(base()), &child);
    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].code, "A003");

    // Name and type both wrong at position 0: name wins.
    let child = child_one(
        MethodDecl::new("m")
            .receiver("self")
            .param("x", "float")
            .param("b", "str")
            .returns("bool"),
    );
    let report = validate(&parent_one(base()), &child);
    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].code, "A004");
}

#[test]
fn test_identical_signatures_pass() {
    assert!(validate(&abc_parent(), &good_child()).is_empty());
    assert!(validate(&parent_one(base()), &child_one(base())).is_empty());
}

#[test]
fn test_cosmetic_differences_pass() {
    // Defaults and typing spellings are not compared.
    let child = child_one(
        MethodDecl::new("m")
            .receiver("self")
            .param("a", "builtins.int")
            .default_value("3")
            .param("b", "typing.Text")
            .returns("bool"),
    );
    assert!(validate(&parent_one(base()), &child).is_empty());
}

#[test]
fn test_each_discrepancy_kind_in_isolation() {
    let parent = parent_one(base());
    let cases: Vec<(MethodDecl, &str)> = vec![
        (
            MethodDecl::new("m")
                .receiver("self")
                .param("a", "int")
                .param("b", "str")
                .returns("None"),
            "A002",
        ),
        (
            MethodDecl::new("m")
                .receiver("self")
                .param("a", "int")
                .param("b", "str")
                .param("c", "str")
                .returns("bool"),
            "A003",
        ),
        (
            MethodDecl::new("m")
                .receiver("self")
                .param("a", "int")
                .param("c", "str")
                .returns("bool"),
            "A004",
        ),
        (
            MethodDecl::new("m")
                .param("a", "int")
                .param("b", "str")
                .returns("bool"),
            "A003",
        ),
        (
            MethodDecl::new("m")
                .receiver("cls")
                .param("a", "int")
                .param("b", "str")
                .returns("bool"),
            "A004",
        ),
        (
            MethodDecl::new("m")
                .receiver("self")
                .param("a", "int")
                .param("b", "bytes")
                .returns("bool"),
            "A005",
        ),
    ];
    for (decl, code) in cases {
        let report = validate(&parent, &child_one(decl));
        assert_eq!(report.len(), 1, "{code}");
        assert_eq!(report.findings[0].code, code);
        assert_eq!(report.findings[0].kind, FindingKind::SignatureMismatch);
        assert!(report.findings[0].diff.is_some());
    }

    let report = validate(&parent, &ClassDef::builder("C").parent("P").build());
    assert_eq!(report.len(), 1);
    assert_eq!(report.findings[0].code, "A001");
    assert_eq!(report.findings[0].kind, FindingKind::MissingOverride);
    assert!(report.findings[0].diff.is_none());
}

#[test]
fn test_untyped_matches_only_untyped() {
    let parent = parent_one(MethodDecl::new("m").receiver("self").untyped("a"));
    let same = child_one(MethodDecl::new("m").receiver("self").untyped("a"));
    assert!(validate(&parent, &same).is_empty());

    let typed_child = child_one(MethodDecl::new("m").receiver("self").param("a", "int"));
    let report = validate(&parent, &typed_child);
    assert!(matches!(
        report.findings[0].discrepancy,
        Some(Discrepancy::ParameterType { .. })
    ));
    assert!(report.render().contains("'a: Any' parameter's type, but gets 'a: int'"));
}

#[test]
fn test_only_immediate_parent_members_are_scanned() {
    let grand = ClassDef::builder("Grand")
        .abstract_method(MethodDecl::new("deep"))
        .build();
    let parent = ClassDef::builder("Parent").parent("Grand").build();
    let child = ClassDef::builder("Child").parent("Parent").build();
    assert_eq!(validate(&grand, &parent).len(), 1);
    assert!(validate(&parent, &child).is_empty());
}

#[test]
fn test_non_restricted_members_are_ignored() {
    let parent = ClassDef::builder("P")
        .method(MethodDecl::new("plain"))
        .method(MethodDecl::new("generic").abstract_only())
        .attribute("value")
        .build();
    let child = ClassDef::builder("C").parent("P").build();
    assert!(validate(&parent, &child).is_empty());
}

#[test]
fn test_attribute_does_not_satisfy_override() {
    let child = ClassDef::builder("C")
        .parent("P")
        .member(Member::Attribute { name: "m".into() })
        .build();
    let report = validate(&parent_one(base()), &child);
    assert_eq!(report.findings[0].kind, FindingKind::MissingOverride);
}
