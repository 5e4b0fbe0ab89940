// Project-level checking through ContractEngine.
use strictabc_core::class::ClassDef;
use strictabc_core::config::StrictConfig;
use strictabc_enforce::engine::ContractEngine;

use crate::common::{abc_parent, good_child, typed};

#[test]
fn test_engine_checks_each_subclass() {
    let bad = ClassDef::builder("Bad")
        .parent("ABCParent")
        .method(typed("method_4", "family", "Tuple[str, str]"))
        .build();
    let mut engine = ContractEngine::new();
    engine.register(abc_parent());
    engine.register(good_child());
    engine.register(bad);
    let result = engine.check();
    assert_eq!(result.classes_checked, 2);
    assert_eq!(result.reports.len(), 1);
    assert_eq!(result.reports[0].subclass, "Bad");
    assert_eq!(result.finding_count(), 4);
    assert_eq!(result.status, "error");
}

#[test]
fn test_suppressed_codes_renumber_report() {
    let config = StrictConfig {
        suppress: vec!["A001".into()],
        ..StrictConfig::default()
    };
    let bad = ClassDef::builder("Bad")
        .parent("ABCParent")
        .method(typed("method_4", "family", "Tuple[str, str]"))
        .build();
    let mut engine = ContractEngine::with_config(&config);
    engine.register(abc_parent());
    engine.register(bad);
    let result = engine.check();
    assert_eq!(result.suppressed, 3);
    assert_eq!(result.reports[0].len(), 1);
    assert_eq!(result.reports[0].findings[0].number, 1);
    assert_eq!(result.reports[0].findings[0].code, "A004");
}
