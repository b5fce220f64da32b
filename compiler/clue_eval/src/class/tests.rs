#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::rules::method;
use crate::{Behavior, RuleRegistry};
use clue_ir::SharedInterner;
use pretty_assertions::assert_eq;

fn table() -> (SharedInterner, ClassTable) {
    let interner = SharedInterner::new();
    let table = ClassTable::new(interner.clone());
    (interner, table)
}

fn slot_names(interner: &SharedInterner, class: &ClassInfo) -> Vec<&'static str> {
    class.slots().iter().map(|&n| interner.lookup(n)).collect()
}

#[test]
fn test_declare_root_without_marker() {
    let (interner, table) = table();
    let class = table
        .declare(ClassDecl::new("Plain").field("x", "int"))
        .unwrap();

    assert_eq!(class.id(), ClassId::from_raw(0));
    assert_eq!(interner.lookup(class.name()), "Plain");
    assert!(!class.has_storage_marker());
    assert!(!class.has_fixed_layout());
    assert_eq!(table.len(), 1);
}

#[test]
fn test_subclass_requires_storage_marker() {
    let (_, table) = table();
    let base = table.declare(ClassDecl::new("Base").fixed_storage()).unwrap();

    let err = table
        .declare(ClassDecl::new("Child").base(base.id()).field("x", "int"))
        .unwrap_err();
    assert_eq!(
        err,
        DeclError::MissingStorageMarker {
            class: "Child".to_owned(),
            base: "Base".to_owned(),
        }
    );
    // Nothing was registered.
    assert_eq!(table.len(), 1);
}

#[test]
fn test_unknown_base() {
    let (_, table) = table();
    let err = table
        .declare(ClassDecl::new("Orphan").base(ClassId::from_raw(7)).fixed_storage())
        .unwrap_err();
    assert_eq!(
        err,
        DeclError::UnknownBase {
            class: "Orphan".to_owned(),
            base: ClassId::from_raw(7),
        }
    );
}

#[test]
fn test_duplicate_field_rejected() {
    let (_, table) = table();
    let err = table
        .declare(ClassDecl::new("Twice").field("x", "int").field("x", "float"))
        .unwrap_err();
    assert_eq!(
        err,
        DeclError::DuplicateField {
            class: "Twice".to_owned(),
            field: "x".to_owned(),
        }
    );
}

#[test]
fn test_slot_errors() {
    let (_, table) = table();
    let err = table
        .declare(ClassDecl::new("S").slots(["a", "a"]))
        .unwrap_err();
    assert_eq!(
        err,
        DeclError::DuplicateSlot {
            class: "S".to_owned(),
            slot: "a".to_owned(),
        }
    );

    let err = table
        .declare(
            ClassDecl::new("T")
                .field_with_default("a", "int", 1_i64)
                .slots(["a"]),
        )
        .unwrap_err();
    assert_eq!(
        err,
        DeclError::SlotConflictsWithDefault {
            class: "T".to_owned(),
            field: "a".to_owned(),
        }
    );
}

#[test]
fn test_collector_fixed_at_root() {
    let (_, table) = table();
    let root = table
        .declare(ClassDecl::new("Root").slots(["a"]).collector(CollectorKind::Slots))
        .unwrap();

    let same = table
        .declare(ClassDecl::new("Same").base(root.id()).slots(["b"]).collector(CollectorKind::Slots))
        .unwrap();
    assert_eq!(same.collector(), CollectorKind::Slots);

    let err = table
        .declare(
            ClassDecl::new("Other")
                .base(root.id())
                .fixed_storage()
                .collector(CollectorKind::Annotations),
        )
        .unwrap_err();
    assert_eq!(
        err,
        DeclError::CollectorOnSubclass {
            class: "Other".to_owned(),
            base: "Root".to_owned(),
        }
    );
}

#[test]
fn test_fixed_layout_needs_whole_chain() {
    let (interner, table) = table();
    let open = table.declare(ClassDecl::new("Open")).unwrap();
    let child = table
        .declare(ClassDecl::new("Child").base(open.id()).slots(["a", "b"]))
        .unwrap();
    assert!(child.has_storage_marker());
    assert!(!child.has_fixed_layout());
    assert_eq!(slot_names(&interner, &child), vec!["a", "b"]);

    let closed = table.declare(ClassDecl::new("Closed").fixed_storage()).unwrap();
    let sub = table
        .declare(ClassDecl::new("Sub").base(closed.id()).fixed_storage())
        .unwrap();
    assert!(sub.has_fixed_layout());
}

#[test]
fn test_chain_and_subclass() {
    let (interner, table) = table();
    let a = table.declare(ClassDecl::new("A").fixed_storage()).unwrap();
    let b = table
        .declare(ClassDecl::new("B").base(a.id()).fixed_storage())
        .unwrap();
    let c = table
        .declare(ClassDecl::new("C").base(b.id()).fixed_storage())
        .unwrap();

    let names: Vec<_> = c.chain().map(|k| interner.lookup(k.name())).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert!(c.is_subclass_of(a.id()));
    assert!(c.is_subclass_of(c.id()));
    assert!(!a.is_subclass_of(c.id()));
    assert_eq!(c.base(), Some(b.id()));
}

#[test]
fn test_behaviors_propagate_as_fresh_bindings() {
    let (interner, table) = table();
    let root = table
        .declare(ClassDecl::datum("Datum", &RuleRegistry::standard()))
        .unwrap();
    let child = table
        .declare(ClassDecl::new("Point").base(root.id()).fixed_storage())
        .unwrap();

    assert_eq!(child.behaviors().len(), 5);
    let hash = interner.intern("hash");
    let (Some(MethodSlot::Lazy(parent)), Some(MethodSlot::Lazy(own))) =
        (root.own_slot(hash), child.own_slot(hash))
    else {
        panic!("expected lazy bindings on both classes");
    };
    assert!(!Arc::ptr_eq(&parent, &own));
}

#[test]
fn test_method_shadows_inherited_behavior() {
    let (interner, table) = table();
    let root = table
        .declare(ClassDecl::datum("Datum", &RuleRegistry::standard()))
        .unwrap();
    let child = table
        .declare(
            ClassDecl::new("Custom")
                .base(root.id())
                .fixed_storage()
                .method("represent", method(|_, _, _| Ok(Value::string("custom")))),
        )
        .unwrap();
    let grandchild = table
        .declare(ClassDecl::new("Deeper").base(child.id()).fixed_storage())
        .unwrap();

    let represent = interner.intern("represent");
    assert!(matches!(child.own_slot(represent), Some(MethodSlot::Native(_))));
    // The grandchild inherits the hand-written method, not a fresh binding.
    assert!(grandchild.own_slot(represent).is_none());
    assert!(matches!(
        grandchild.lookup(represent),
        Some((owner, MethodSlot::Native(_))) if owner.id() == child.id()
    ));
    assert_eq!(grandchild.behaviors().len(), 4);
}

#[test]
fn test_subclass_behavior_extends_list() {
    let (interner, table) = table();
    let root = table
        .declare(ClassDecl::datum("Datum", &RuleRegistry::standard()))
        .unwrap();
    let my = table
        .declare(
            ClassDecl::new("MyDatum")
                .base(root.id())
                .fixed_storage()
                .behavior(Behavior::AsDict.rule()),
        )
        .unwrap();

    let names: Vec<_> = my
        .behaviors()
        .iter()
        .map(|&(name, _)| interner.lookup(name))
        .collect();
    assert_eq!(
        names,
        vec!["construct", "represent", "equals", "iterate-fields", "hash", "as-dict"]
    );
    assert!(root.own_slot(interner.intern("as-dict")).is_none());
}

#[test]
fn test_default_for_searches_derived_first() {
    let (interner, table) = table();
    let base = table
        .declare(ClassDecl::new("Base").field_with_default("y", "int", 23_i64))
        .unwrap();
    let child = table
        .declare(
            ClassDecl::new("Child")
                .base(base.id())
                .fixed_storage()
                .field_with_default("y", "int", 5_i64),
        )
        .unwrap();

    let y = interner.intern("y");
    assert_eq!(base.default_for(y), Some(Value::int(23)));
    assert_eq!(child.default_for(y), Some(Value::int(5)));
    assert_eq!(child.default_for(interner.intern("z")), None);
}

#[test]
fn test_find_by_name() {
    let (_, table) = table();
    let first = table.declare(ClassDecl::new("Dup")).unwrap();
    let second = table.declare(ClassDecl::new("Dup")).unwrap();
    assert_eq!(table.find("Dup").map(|c| c.id()), Some(second.id()));
    assert_ne!(first.id(), second.id());
    assert!(table.find("Missing").is_none());
}
