//! Class declarations and the per-class namespace.
//!
//! A [`ClassDecl`] describes a class as written: its base, its own fields,
//! its storage marker, and the behaviors and methods it adds. The
//! [`ClassTable`] validates a declaration, runs propagation and freezes it
//! into a [`ClassInfo`]. Only the namespace of a `ClassInfo` changes after
//! declaration, as lazy bindings are replaced by artifacts.

mod table;

use std::sync::Arc;

use clue_ir::{ClassId, Name};
use clue_value::{FieldDecl, Value};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::collector::CollectorKind;
use crate::lazy::MethodSlot;
use crate::rules::{MethodFn, RuleRegistry, SynthesisRule};

pub use table::ClassTable;

/// Declaration-time failure. The class is not registered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeclError {
    #[error("class '{class}' must declare fixed storage to derive from '{base}'")]
    MissingStorageMarker { class: String, base: String },

    #[error("class '{class}' derives from unknown class {base}")]
    UnknownBase { class: String, base: ClassId },

    #[error("class '{class}' declares field '{field}' more than once")]
    DuplicateField { class: String, field: String },

    #[error("class '{class}' lists slot '{slot}' more than once")]
    DuplicateSlot { class: String, slot: String },

    #[error("class '{class}': '{field}' has a default and is also a storage slot")]
    SlotConflictsWithDefault { class: String, field: String },

    #[error("class '{class}' cannot change the clue collector inherited from '{base}'")]
    CollectorOnSubclass { class: String, base: String },

    #[error("class table full: cannot declare '{class}' after {count} classes")]
    TooManyClasses { class: String, count: usize },
}

/// A field as written in a declaration, before interning.
#[derive(Clone, Debug)]
pub(crate) struct FieldSpec {
    pub(crate) name: String,
    pub(crate) ty: String,
    pub(crate) default: Option<Value>,
}

/// Builder describing one class declaration.
#[derive(Clone)]
pub struct ClassDecl {
    pub(crate) name: String,
    pub(crate) base: Option<ClassId>,
    pub(crate) fields: Vec<FieldSpec>,
    pub(crate) slots: Option<Vec<String>>,
    pub(crate) behaviors: Vec<SynthesisRule>,
    pub(crate) methods: Vec<(String, MethodFn)>,
    pub(crate) collector: Option<CollectorKind>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDecl {
            name: name.into(),
            base: None,
            fields: Vec::new(),
            slots: None,
            behaviors: Vec::new(),
            methods: Vec::new(),
            collector: None,
        }
    }

    /// A root class carrying every rule in `registry`, with fixed storage.
    ///
    /// Subclasses of a datum root get their behaviors by propagation.
    pub fn datum(name: impl Into<String>, registry: &RuleRegistry) -> Self {
        ClassDecl::new(name).fixed_storage().behaviors(registry)
    }

    #[must_use]
    pub fn base(mut self, base: ClassId) -> Self {
        self.base = Some(base);
        self
    }

    /// Declare a field without a default.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            ty: ty.into(),
            default: None,
        });
        self
    }

    /// Declare a field with a class-level default.
    #[must_use]
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            ty: ty.into(),
            default: Some(default.into()),
        });
        self
    }

    /// Mark the class as adding no instance storage beyond its fields.
    #[must_use]
    pub fn fixed_storage(mut self) -> Self {
        self.slots.get_or_insert_with(Vec::new);
        self
    }

    /// Declare explicit storage slots. Also counts as the storage marker.
    #[must_use]
    pub fn slots<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots
            .get_or_insert_with(Vec::new)
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Register a lazily synthesized behavior on this class and its
    /// subclasses.
    #[must_use]
    pub fn behavior(mut self, rule: SynthesisRule) -> Self {
        self.behaviors.retain(|r| r.name != rule.name);
        self.behaviors.push(rule);
        self
    }

    /// Register every rule in `registry`.
    #[must_use]
    pub fn behaviors(self, registry: &RuleRegistry) -> Self {
        registry.iter().fold(self, ClassDecl::behavior)
    }

    /// Attach a hand-written method. It shadows any inherited behavior of
    /// the same name, here and in later subclasses.
    #[must_use]
    pub fn method(mut self, name: impl Into<String>, func: MethodFn) -> Self {
        self.methods.push((name.into(), func));
        self
    }

    /// Choose how clues are discovered. Root classes only.
    #[must_use]
    pub fn collector(mut self, kind: CollectorKind) -> Self {
        self.collector = Some(kind);
        self
    }
}

/// A declared class.
pub struct ClassInfo {
    id: ClassId,
    name: Name,
    base: Option<ClassId>,
    /// Root first, parent last. Excludes this class.
    ancestors: Vec<Arc<ClassInfo>>,
    fields: Vec<FieldDecl>,
    slots: Option<Vec<Name>>,
    fixed_layout: bool,
    collector: CollectorKind,
    /// Lazy behaviors subclasses inherit, in registration order.
    behaviors: Vec<(Name, SynthesisRule)>,
    namespace: RwLock<FxHashMap<Name, MethodSlot>>,
}

impl ClassInfo {
    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn base(&self) -> Option<ClassId> {
        self.base
    }

    /// Fields declared by this class itself, in declaration order.
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Storage slots declared by this class itself.
    pub fn slots(&self) -> &[Name] {
        self.slots.as_deref().unwrap_or(&[])
    }

    /// Whether this class carries the storage marker.
    pub fn has_storage_marker(&self) -> bool {
        self.slots.is_some()
    }

    /// Whether every class in the chain carries the storage marker, so
    /// instances accept only known names.
    pub fn has_fixed_layout(&self) -> bool {
        self.fixed_layout
    }

    pub fn collector(&self) -> CollectorKind {
        self.collector
    }

    pub fn behaviors(&self) -> &[(Name, SynthesisRule)] {
        &self.behaviors
    }

    /// This class and its ancestors, root first.
    pub fn chain(&self) -> impl DoubleEndedIterator<Item = &ClassInfo> {
        self.ancestors
            .iter()
            .map(|a| &**a)
            .chain(std::iter::once(self))
    }

    pub fn is_subclass_of(&self, other: ClassId) -> bool {
        self.chain().any(|c| c.id == other)
    }

    /// The entry in this class's own namespace, ignoring ancestors.
    pub fn own_slot(&self, name: Name) -> Option<MethodSlot> {
        self.namespace.read().get(&name).cloned()
    }

    /// Find `name` in this class or its nearest ancestor that has it.
    pub fn lookup(&self, name: Name) -> Option<(&ClassInfo, MethodSlot)> {
        self.chain()
            .rev()
            .find_map(|class| class.own_slot(name).map(|slot| (class, slot)))
    }

    /// Install into this class's own namespace only.
    pub(crate) fn install(&self, name: Name, slot: MethodSlot) {
        self.namespace.write().insert(name, slot);
    }

    /// Class-level default for `field`, searched derived first.
    pub fn default_for(&self, field: Name) -> Option<Value> {
        self.chain().rev().find_map(|class| {
            class
                .fields
                .iter()
                .find(|decl| decl.name == field)
                .and_then(|decl| decl.default.value().cloned())
        })
    }

    /// Whether any class in the chain declares `name` as a slot.
    pub fn has_slot(&self, name: Name) -> bool {
        self.chain().any(|class| class.slots().contains(&name))
    }
}

impl std::fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("base", &self.base)
            .field("fields", &self.fields.len())
            .field("fixed_layout", &self.fixed_layout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
