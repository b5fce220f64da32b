use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("x");
    let b = interner.intern("x");
    let c = interner.intern("y");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_lookup_returns_text() {
    let interner = StringInterner::new();
    let name = interner.intern("Coordinates");
    assert_eq!(interner.lookup(name), "Coordinates");
}

#[test]
fn test_empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.len(), 1);
}

#[test]
fn test_get_does_not_insert() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), 1);
    let name = interner.intern("present");
    assert_eq!(interner.get("present"), Some(name));
}

#[test]
fn test_lookup_unknown_name_is_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(999)), "");
}

#[test]
fn test_shared_interner_clones_share_table() {
    let shared = SharedInterner::new();
    let clone = shared.clone();
    let name = shared.intern("shared");
    assert_eq!(clone.lookup(name), "shared");
    assert_eq!(clone.get("shared"), Some(name));
}

#[test]
fn test_concurrent_interning_agrees() {
    let shared = SharedInterner::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interner = shared.clone();
            std::thread::spawn(move || {
                (0..64)
                    .map(|i| interner.intern(&format!("field_{i}")))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<Name>> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or_default())
        .collect();
    for other in &results[1..] {
        assert_eq!(&results[0], other);
    }
    // 64 fields + the empty string
    assert_eq!(shared.len(), 65);
}
