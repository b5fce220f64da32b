//! Clue discovery.
//!
//! A collector turns a class and its ancestors into one [`ClueSet`]. Both
//! collectors walk the chain root first, so a derived declaration overrides
//! an inherited one in place. Collection is pure and is repeated for every
//! synthesis; nothing is cached on the class.

use clue_ir::TypeToken;
use clue_value::{ClueSet, FieldDecl};

use crate::class::ClassInfo;

/// Source of the fields a class's behaviors are synthesized from.
pub trait ClueCollector {
    fn collect(&self, class: &ClassInfo) -> ClueSet;
}

/// Fields come from field declarations (`x: int`, `y: int = 23`).
#[derive(Clone, Copy, Debug, Default)]
pub struct AnnotationCollector;

impl ClueCollector for AnnotationCollector {
    fn collect(&self, class: &ClassInfo) -> ClueSet {
        let mut clues = ClueSet::new();
        for ancestor in class.chain() {
            clues.merge(ancestor.fields());
        }
        clues
    }
}

/// Fields come from storage slot lists. Slots never carry defaults and have
/// no declared type.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlotCollector;

impl ClueCollector for SlotCollector {
    fn collect(&self, class: &ClassInfo) -> ClueSet {
        let mut clues = ClueSet::new();
        for ancestor in class.chain() {
            for &slot in ancestor.slots() {
                clues.merge_decl(&FieldDecl::slot(slot, TypeToken::UNTYPED));
            }
        }
        clues
    }
}

/// Which collector a class hierarchy uses. Chosen on the root class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollectorKind {
    #[default]
    Annotations,
    Slots,
}

impl CollectorKind {
    pub fn collect(self, class: &ClassInfo) -> ClueSet {
        match self {
            CollectorKind::Annotations => AnnotationCollector.collect(class),
            CollectorKind::Slots => SlotCollector.collect(class),
        }
    }
}
