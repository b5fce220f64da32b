#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::ClassDecl;
use pretty_assertions::assert_eq;

fn noop(_ctx: &SynthesisContext<'_>, _clues: &ClueSet) -> Result<MethodFn, SynthesisError> {
    Ok(method(|_, _, _| Ok(Value::None)))
}

#[test]
fn test_standard_registry_order() {
    let names: Vec<_> = RuleRegistry::standard().iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec!["construct", "represent", "equals", "iterate-fields", "hash"]
    );
}

#[test]
fn test_with_extras_appends() {
    let registry = RuleRegistry::with_extras();
    assert_eq!(registry.len(), 7);
    assert!(registry.get("as-dict").is_some());
    assert!(registry.get("match-args").is_some());
}

#[test]
fn test_register_replaces_same_name() {
    let mut registry = RuleRegistry::standard();
    registry.register(SynthesisRule::new("hash", noop));
    assert_eq!(registry.len(), 5);
    // Replacement keeps the original position.
    assert_eq!(registry.iter().nth(4).map(|r| r.name), Some("hash"));
}

#[test]
fn test_register_new_name() {
    let mut registry = RuleRegistry::new();
    assert!(registry.is_empty());
    registry.register(SynthesisRule::new("describe", noop));
    assert_eq!(registry.iter().map(|r| r.name).collect::<Vec<_>>(), vec!["describe"]);
}

#[test]
fn test_identifier_check() {
    assert!(is_identifier("x"));
    assert!(is_identifier("_private"));
    assert!(is_identifier("field_2"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("2fast"));
    assert!(!is_identifier("has space"));
    assert!(!is_identifier("dash-ed"));
}

#[test]
fn test_context_rejects_bad_field_name() {
    let rt = Runtime::new();
    let id = rt
        .declare(ClassDecl::new("Odd").field("not valid", "int"))
        .unwrap();
    let class = rt.class(id).unwrap();
    let behavior = rt.name("represent");
    let ctx = SynthesisContext::new(&class, behavior, rt.interner());

    let clues = rt.clues(id).unwrap();
    assert_eq!(
        ctx.field_names(&clues).unwrap_err(),
        SynthesisError::InvalidFieldName {
            class: "Odd".to_owned(),
            behavior: "represent".to_owned(),
            field: "not valid".to_owned(),
        }
    );
}

#[test]
fn test_context_reject_names_class_and_behavior() {
    let rt = Runtime::new();
    let id = rt.declare(ClassDecl::new("Thing")).unwrap();
    let class = rt.class(id).unwrap();
    let ctx = SynthesisContext::new(&class, rt.name("as-json"), rt.interner());

    assert_eq!(ctx.class_id(), id);
    assert_eq!(
        ctx.reject("nested records are not supported"),
        SynthesisError::Rejected {
            class: "Thing".to_owned(),
            behavior: "as-json".to_owned(),
            reason: "nested records are not supported".to_owned(),
        }
    );
}

#[test]
fn test_no_args() {
    assert!(no_args("hash", &Args::new()).is_ok());
    assert_eq!(
        no_args("hash", &Args::new().arg(1)),
        Err(EvalError::WrongArgCount {
            method: "hash".to_owned(),
            expected: 0,
            got: 1,
        })
    );
}
